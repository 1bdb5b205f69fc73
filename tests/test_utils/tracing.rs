/// Routes resolver and loader logs through the test harness. Filter with
/// `RUST_LOG`, e.g. `RUST_LOG=component_order=trace`.
#[allow( dead_code )]
fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter( tracing_subscriber::EnvFilter::from_default_env() )
		.with_test_writer()
		.try_init();
}
