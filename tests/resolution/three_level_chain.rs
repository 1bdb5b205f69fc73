use component_order::resolve ;

fixtures! {
	requested	= [ "app" ];
	components	= [
		"app" needs [ "storage" ],
		"store" provides [ "storage" ] needs [ "logging" ],
		"log" provides [ "logging" ],
	];
}

#[test]
fn resolution_three_level_chain() {

	let order = resolve( fixtures::requested(), fixtures::available(), [] ).unwrap();
	assert_order!( order, [ "log", "store", "app" ]);
	crate::assert_dependencies_first( &order );

	let app = &order[ 2 ];
	assert_eq!( app.direct_dependencies().iter().collect::<Vec<_>>(), [ "store" ]);
	assert_eq!( app.all_dependencies().iter().collect::<Vec<_>>(), [ "log", "store" ]);

}
