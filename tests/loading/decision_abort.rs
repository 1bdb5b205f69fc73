use component_order::{ resolve, Decision, Descriptor, Loader };
use crate::Broken ;

fixtures! {
	requested	= [ "a", "b", "c" ];
	components	= [ "a", "b", "c" ];
}

#[test]
fn loading_decision_abort() {

	let order = resolve( fixtures::requested(), fixtures::available(), [] ).unwrap();

	let mut instantiated = Vec::new();
	let mut factory = | descriptor: &Descriptor | {
		instantiated.push( descriptor.name().to_string() );
		match descriptor.name() {
			"b" => Err( Broken( "b".to_string() )),
			name => Ok( name.len() ),
		}
	};

	let result = Loader::new( &mut factory )
		.with_error_handler(| _, err | match err {
			Broken( name ) if name == "b" => Decision::Abort,
			Broken( _ ) => Decision::Continue,
		})
		.load( &order );

	match result {
		Err( aborted ) => {
			assert_eq!( aborted.error.component, "b" );
			assert_eq!( aborted.partial.names().collect::<Vec<_>>(), [ "a" ]);
			assert!( aborted.partial.failures.is_empty() );
			assert_eq!( aborted.to_string(), "Loading aborted: Failed to instantiate component 'b': b is broken" );
		},
		Ok( loaded ) => panic!( "Expected failure, found: {:#?}", loaded ),
	}
	assert_eq!( instantiated, [ "a", "b" ]);

}
