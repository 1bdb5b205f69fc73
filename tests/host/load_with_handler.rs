use component_order::{ Decision, Descriptor, Host, ProviderPolicy };
use crate::Broken ;

fixtures! {
	requested	= [ "metrics", "search", "sync" ];
	components	= [
		"metrics",
		"search" needs [ "index" ],
		"sync",
		"tantivy" provides [ "index" ],
	];
}

#[test]
fn host_load_with_continue() {

	let mut host = Host::new(| descriptor: &Descriptor | match descriptor.name() {
		"search" => Err( Broken( "search".to_string() )),
		name => Ok( name.len() ),
	}).with_provider_policy( ProviderPolicy::PreferDiscovered );

	let report = host.load_with( fixtures::requested(), fixtures::available(), | _, _ | Decision::Continue ).unwrap();

	assert_eq!( report.loaded, [ "metrics", "sync", "tantivy" ]);
	assert_eq!( report.failures.len(), 1 );
	assert_eq!( report.failures[ 0 ].component, "search" );
	assert!( report.skipped.is_empty() );

	// The failed component is not recorded and can be requested again.
	assert!( !host.is_loaded( "search" ));
	let plan = host.plan( fixtures::requested(), fixtures::available() ).unwrap();
	assert_eq!( plan.iter().map(| candidate | candidate.name() ).collect::<Vec<_>>(), [ "search" ]);

}

#[test]
fn host_load_with_skip() {

	let mut host = Host::new(| descriptor: &Descriptor | match descriptor.name() {
		"metrics" => Err( Broken( "metrics".to_string() )),
		_ => Ok(()),
	});

	let report = host.load_with( fixtures::requested(), fixtures::available(), | _, _ | Decision::Skip ).unwrap();

	assert!( report.loaded.is_empty() );
	assert_eq!( report.skipped, [ "sync", "tantivy", "search" ]);
	assert_eq!( host.loaded().count(), 0 );

}
