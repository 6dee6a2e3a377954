//! End-to-end search and match flows against the in-memory gateway.
//!
//! Requires the `mock` feature: cargo test -p pawmatch-client --features mock

use pawmatch_client::{sample_dogs, StubGateway, StubOperation};
use pawmatch_core::{
    resolve_match, run_fetch_cycle, CatalogCommand, CatalogEvent, CatalogPhase, CatalogState,
    DogGateway, DogId, Favorites, FilterSet, FilterUpdate, MatchState, SearchQuery, SortKey,
};

fn gateway() -> StubGateway {
    StubGateway::new().with_dogs(sample_dogs())
}

/// Drive the catalog with real gateway calls until it settles.
async fn drive(state: &mut CatalogState, gateway: &dyn DogGateway, event: CatalogEvent) {
    let mut next = state.handle(event);
    while let Some(command) = next {
        let event = match command {
            CatalogCommand::LoadBreeds => match gateway.list_breeds().await {
                Ok(breeds) => CatalogEvent::BreedsLoaded(breeds),
                Err(e) => CatalogEvent::BreedsFailed(e.to_string()),
            },
            CatalogCommand::FetchResults(ticket) => run_fetch_cycle(gateway, &ticket).await,
        };
        next = state.handle(event);
    }
}

#[tokio::test]
async fn test_beagles_aged_two_to_five_sorted_by_age() {
    let gateway = gateway();
    let mut state = CatalogState::default();
    drive(&mut state, &gateway, CatalogEvent::Mount).await;
    assert_eq!(state.phase(), CatalogPhase::Ready);
    assert_eq!(state.total(), 12);

    let filters = FilterSet {
        breeds: vec!["Beagle".to_string()],
        age_min: Some(2),
        age_max: Some(5),
        zip_code: None,
        sort: "age:asc".parse::<SortKey>().unwrap(),
    };
    drive(
        &mut state,
        &gateway,
        CatalogEvent::Filter(FilterUpdate::Apply(filters)),
    )
    .await;

    assert_eq!(state.phase(), CatalogPhase::Ready);
    let ids: Vec<_> = state.dogs().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["dog-11", "dog-5", "dog-1", "dog-3"]);
    assert!(state.dogs().iter().all(|d| d.breed == "Beagle"));
    assert_eq!(state.total(), 4);
    assert!(!state.shows_pagination());
}

#[tokio::test]
async fn test_paging_through_small_pages() {
    let gateway = gateway();
    let mut state = CatalogState::new(SearchQuery::with_page_size(5));
    drive(&mut state, &gateway, CatalogEvent::Mount).await;
    assert_eq!(state.total_pages(), 3);
    assert!(state.shows_pagination());

    drive(&mut state, &gateway, CatalogEvent::NextPage).await;
    assert_eq!(state.current_page(), 2);
    assert_eq!(state.query().from, 5);
    assert_eq!(state.dogs().len(), 5);

    drive(&mut state, &gateway, CatalogEvent::GoToPage(3)).await;
    assert_eq!(state.dogs().len(), 2);
    assert_eq!(state.summary(), "Found 12 dogs • Page 3 of 3");
}

#[tokio::test]
async fn test_breed_failure_still_loads_results() {
    let gateway = gateway().with_failure(StubOperation::ListBreeds);
    let mut state = CatalogState::default();
    drive(&mut state, &gateway, CatalogEvent::Mount).await;

    assert_eq!(state.phase(), CatalogPhase::Ready);
    assert!(state.breeds().is_empty());
    assert_eq!(state.total(), 12);
    assert_eq!(gateway.call_count(StubOperation::SearchDogIds), 1);
}

#[tokio::test]
async fn test_match_from_favorites() {
    let gateway = gateway().with_match("dog-7");
    let favorites: Favorites = [DogId::from("dog-2"), DogId::from("dog-7")]
        .into_iter()
        .collect();

    let state = resolve_match(&gateway, &favorites).await;
    let dog = state.matched_dog().expect("a matched dog");
    assert_eq!(dog.name, "Milo");
    assert_eq!(
        gateway.operations(),
        vec![StubOperation::ComputeMatch, StubOperation::FetchDogsByIds]
    );
}

#[tokio::test]
async fn test_match_failure_is_errored() {
    let gateway = gateway().with_failure(StubOperation::ComputeMatch);
    let favorites: Favorites = [DogId::from("dog-2")].into_iter().collect();

    let state = resolve_match(&gateway, &favorites).await;
    assert!(matches!(state, MatchState::Errored(_)));
    assert_eq!(gateway.call_count(StubOperation::FetchDogsByIds), 0);
}
