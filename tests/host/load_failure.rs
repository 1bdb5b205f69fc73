use std::collections::HashSet ;
use component_order::{ Descriptor, Host, HostError, ResolutionError };
use crate::Broken ;

fixtures! {
	requested	= [ "c" ];
	components	= [
		"a",
		"b" needs [ "a" ],
		"c" needs [ "b", "missing" ],
		"d" needs [ "b" ],
	];
}

#[test]
fn host_load_failure_keeps_partial() {

	let broken = HashSet::from([ "b".to_string() ]);
	let mut host = Host::new(| descriptor: &Descriptor | match broken.contains( descriptor.name() ) {
		true => Err( Broken( descriptor.name().to_string() )),
		false => Ok(()),
	});

	match host.load([ fixtures::component( "d" )], fixtures::available() ) {
		Err( HostError::Instantiation( err )) => assert_eq!( err.component, "b" ),
		value => panic!( "Expected Instantiation error, found: {:#?}", value ),
	}

	// "a" stays loaded; a retry only plans what is still missing.
	assert!( host.is_loaded( "a" ));
	assert!( !host.is_loaded( "b" ));
	let plan = host.plan([ fixtures::component( "d" )], fixtures::available() ).unwrap();
	assert_eq!( plan.iter().map(| candidate | candidate.name() ).collect::<Vec<_>>(), [ "b", "d" ]);

}

#[test]
fn host_resolution_failure_loads_nothing() {

	let mut host = Host::new(| _: &Descriptor | Ok::<_, Broken>(()));

	match host.load( fixtures::requested(), fixtures::available() ) {
		Err( HostError::Resolution( ResolutionError::UnresolvedDependency { missing })) => {
			assert_eq!( missing.keys().collect::<Vec<_>>(), [ "c" ]);
		},
		value => panic!( "Expected Resolution error, found: {:#?}", value ),
	}
	assert_eq!( host.loaded().count(), 0 );

}
