use component_order::{ resolve, Decision, Descriptor, Loader };
use crate::Broken ;

fixtures! {
	requested	= [ "a", "b", "c" ];
	components	= [ "a", "b", "c" ];
}

#[test]
fn loading_decision_silent() {

	let order = resolve( fixtures::requested(), fixtures::available(), [] ).unwrap();

	let mut factory = | descriptor: &Descriptor | Err::<(), _>( Broken( descriptor.name().to_string() ));

	let mut consulted = 0 ;
	let loaded = Loader::new( &mut factory )
		.with_error_handler(| _, _ | {
			consulted += 1 ;
			Decision::Silent
		})
		.load( &order )
		.unwrap();

	// Asked once, yet every failure is still recorded.
	assert_eq!( consulted, 1 );
	assert_eq!( loaded.failures.len(), 3 );
	assert_eq!( loaded.names().count(), 0 );

}
