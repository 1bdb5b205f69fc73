use std::collections::{ BTreeMap, BTreeSet, HashSet };
use tracing::trace ;

use crate::Candidate ;



/// Orders resolved candidates so that every candidate comes after all of its
/// dependencies.
///
/// Kahn's algorithm: each round takes every candidate with no remaining
/// dependency, in name order, so independent components always end up in
/// the same relative order. Dependencies on components outside the input
/// (already loaded ones) are ignored.
///
/// # Panics
/// Panics if the candidates depend on each other in a cycle. The resolver
/// rejects cycles before sorting, so this only happens when the input was
/// not produced by it.
pub fn sort( candidates: impl IntoIterator<Item = Candidate> ) -> Vec<Candidate> {

    let candidates = candidates.into_iter().collect::<Vec<_>>();
    let members = candidates.iter().map(| candidate | candidate.name().to_string()).collect::<HashSet<_>>();

    let mut remaining = candidates.into_iter()
        .map(| candidate | {
            let pending = candidate.all_dependencies().iter()
                .chain( candidate.direct_dependencies() )
                .filter(| dep | members.contains( *dep ) && *dep != candidate.name() )
                .cloned()
                .collect::<BTreeSet<_>>();
            ( candidate.name().to_string(), ( candidate, pending ))
        })
        .collect::<BTreeMap<_, _>>();

    let mut ordered = Vec::with_capacity( remaining.len() );

    while !remaining.is_empty() {

        // BTreeMap iteration keeps each ready set in name order.
        let ready = remaining.iter()
            .filter(|( _, ( _, pending ))| pending.is_empty() )
            .map(|( name, _ )| name.clone() )
            .collect::<Vec<_>>();

        assert!(
            !ready.is_empty(),
            "Cannot order candidates with cyclic dependencies: {:?}",
            remaining.keys().collect::<Vec<_>>(),
        );
        trace!( ?ready, "Ordered ready candidates" );

        ordered.extend( ready.iter().filter_map(| name | remaining.remove( name )).map(|( candidate, _ )| candidate ));
        remaining.values_mut().for_each(|( _, pending )| ready.iter().for_each(| name | { pending.remove( name ); }));

    }

    ordered

}

#[cfg( test )]
mod tests {

    use crate::{ Candidate, Descriptor };
    use super::sort ;

    fn depending_on( name: &str, dep: &str ) -> Candidate {
        let mut candidate = Candidate::requested( Descriptor::new( name ).with_deps([ dep ]).shared() );
        candidate.direct_dependencies.insert( dep.to_string() );
        candidate
    }

    #[test]
    #[should_panic( expected = "cyclic dependencies" )]
    fn sort_panics_on_cycle() {
        sort([ depending_on( "a", "b" ), depending_on( "b", "a" )]);
    }

    #[test]
    fn sort_orders_hand_built_chain() {
        let order = sort([ depending_on( "b", "a" ), Candidate::requested( Descriptor::new( "a" ).shared() )]);
        assert_eq!( order.iter().map( Candidate::name ).collect::<Vec<_>>(), [ "a", "b" ]);
    }

}
