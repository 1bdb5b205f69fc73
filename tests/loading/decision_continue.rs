use component_order::{ resolve, Decision, Descriptor, Loader };
use crate::Broken ;

fixtures! {
	requested	= [ "a", "b", "c" ];
	components	= [ "a", "b", "c" ];
}

#[test]
fn loading_decision_continue() {

	let order = resolve( fixtures::requested(), fixtures::available(), [] ).unwrap();

	let mut instantiated = Vec::new();
	let mut factory = | descriptor: &Descriptor | {
		instantiated.push( descriptor.name().to_string() );
		match descriptor.name() {
			"b" => Ok( () ),
			name => Err( Broken( name.to_string() )),
		}
	};

	let mut consulted = Vec::new();
	let loaded = Loader::new( &mut factory )
		.with_error_handler(| descriptor, _ | {
			consulted.push( descriptor.name().to_string() );
			Decision::Continue
		})
		.load( &order )
		.unwrap();

	assert_eq!( instantiated, [ "a", "b", "c" ]);
	assert_eq!( consulted, [ "a", "c" ]);
	assert_eq!( loaded.names().collect::<Vec<_>>(), [ "b" ]);
	assert_eq!( loaded.failures.iter().map(| failure | failure.component.as_str() ).collect::<Vec<_>>(), [ "a", "c" ]);
	assert_eq!( loaded.failures[ 0 ].to_string(), "Failed to instantiate component 'a': a is broken" );
	assert!( loaded.skipped.is_empty() );
	assert!( !loaded.is_complete() );

}
