use gtdpad_core::{
    CollectionError, EntityInfo, GroupEntity, GroupRepository, ItemEntity, KeyValueStore,
    MemoryStore, RepoError, ALL_GROUPS, SNAPSHOT_KEY, TOP_ITEMS_CAPACITY,
};
use std::cell::RefCell;
use std::rc::Rc;

fn item(id: &str) -> ItemEntity {
    let info = EntityInfo::new(id, id, "", "", "").unwrap();
    ItemEntity::new(info, format!("{id} notes"), "")
}

fn group(id: &str, items: Vec<ItemEntity>) -> GroupEntity {
    let info = EntityInfo::new(id, id, "", "Assets/LightGray.png", "").unwrap();
    GroupEntity::with_items(info, items)
}

fn item_ids<S: KeyValueStore>(repo: &GroupRepository<S>, group_id: &str) -> Vec<String> {
    repo.group(group_id)
        .unwrap()
        .items()
        .iter()
        .map(|item| item.id().to_string())
        .collect()
}

#[test]
fn empty_store_is_seeded_and_saved() {
    let store = MemoryStore::new();
    let repo = GroupRepository::open_or_seed(&store).unwrap();

    let groups = repo.groups(ALL_GROUPS).unwrap();
    let ids: Vec<_> = groups.iter().map(|group| group.id()).collect();
    assert_eq!(
        ids,
        ["ASAP", "Waiting", "Calendar", "Projects", "FutureMaybe", "Archive"]
    );
    assert!(store.contains_key(SNAPSHOT_KEY));
    assert_eq!(repo.item("Pay Bills").unwrap().info().title(), "Pay bills");
}

#[test]
fn reopening_restores_the_saved_snapshot() {
    let store = MemoryStore::new();
    {
        let mut repo = GroupRepository::open_or_seed(&store).unwrap();
        repo.add_item("ASAP", item("Call mom")).unwrap();
        repo.update_group("Archive", |info| {
            info.set_subtitle("Old stuff");
        })
        .unwrap();
        repo.save().unwrap();
    }

    let repo = GroupRepository::open_or_seed(&store).unwrap();

    assert_eq!(item_ids(&repo, "ASAP"), ["Work out", "Call mom"]);
    assert_eq!(repo.item("Call mom").unwrap().group_id(), "ASAP");
    assert_eq!(repo.group("Archive").unwrap().info().subtitle(), "Old stuff");
    let asap = repo.group("ASAP").unwrap();
    assert_eq!(asap.top_items().as_slice(), asap.items().as_slice());
}

#[test]
fn unknown_collection_names_are_rejected() {
    let repo = GroupRepository::open_or_seed(MemoryStore::new()).unwrap();

    let err = repo.groups("SomeGroups").unwrap_err();

    assert!(matches!(err, RepoError::UnsupportedQuery(name) if name == "SomeGroups"));
}

#[test]
fn lookups_find_unique_ids_only() {
    let repo = GroupRepository::open_or_seed(MemoryStore::new()).unwrap();

    assert_eq!(repo.group("Projects").unwrap().items().len(), 2);
    assert_eq!(repo.item("Learn Ruby").unwrap().group_id(), "Projects");
    assert!(repo.group("Someday").is_none());
    assert!(repo.item("Learn Go").is_none());
}

#[test]
fn ambiguous_ids_in_a_loaded_snapshot_resolve_to_none() {
    let store = MemoryStore::new();
    let groups = vec![
        group("Home", vec![item("Shared"), item("Dishes")]),
        group("Work", vec![item("Shared")]),
        group("Home", Vec::new()),
    ];
    store
        .set(SNAPSHOT_KEY, &serde_json::to_vec(&groups).unwrap())
        .unwrap();

    let repo = GroupRepository::open_or_seed(&store).unwrap();

    assert!(repo.item("Shared").is_none());
    assert!(repo.group("Home").is_none());
    assert_eq!(repo.item("Dishes").unwrap().group_id(), "Home");
    assert_eq!(repo.group("Work").unwrap().items().len(), 1);
}

#[test]
fn corrupt_snapshot_is_reported() {
    let store = MemoryStore::new();
    store.set(SNAPSHOT_KEY, b"{not json").unwrap();

    let err = GroupRepository::open_or_seed(&store).err().unwrap();

    assert!(matches!(err, RepoError::Snapshot(_)));
}

#[test]
fn snapshot_with_blank_id_is_rejected() {
    let store = MemoryStore::new();
    let snapshot = r#"[{"info":{"id":"  ","title":"t","subtitle":"","description":""},"items":[]}]"#;
    store.set(SNAPSHOT_KEY, snapshot.as_bytes()).unwrap();

    let err = GroupRepository::open_or_seed(&store).err().unwrap();

    assert!(matches!(err, RepoError::Snapshot(_)));
}

#[test]
fn duplicate_ids_are_refused_on_insert() {
    let mut repo = GroupRepository::open_or_seed(MemoryStore::new()).unwrap();

    let err = repo.add_group(group("ASAP", Vec::new())).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateGroupId(id) if id == "ASAP"));

    let err = repo
        .add_group(group("Errands", vec![item("Work out")]))
        .unwrap_err();
    assert!(matches!(err, RepoError::DuplicateItemId(id) if id == "Work out"));

    let err = repo
        .add_group(group("Errands", vec![item("Milk"), item("Milk")]))
        .unwrap_err();
    assert!(matches!(err, RepoError::DuplicateItemId(id) if id == "Milk"));

    let err = repo.add_item("Waiting", item("Learn Ruby")).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateItemId(_)));

    assert!(repo.group("Errands").is_none());
    assert_eq!(repo.all_groups().len(), 6);
}

#[test]
fn add_and_remove_group_publish_on_the_group_collection() {
    let mut repo = GroupRepository::open_or_seed(MemoryStore::new()).unwrap();
    let kinds = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&kinds);
    repo.subscribe_groups(move |change| sink.borrow_mut().push(change.kind()));

    repo.add_group(group("Errands", vec![item("Milk")])).unwrap();
    let removed = repo.remove_group("Errands").unwrap();

    assert_eq!(removed.items().len(), 1);
    assert!(repo.group("Errands").is_none());
    assert_eq!(*kinds.borrow(), ["insert", "remove"]);
    assert!(matches!(
        repo.remove_group("Errands").unwrap_err(),
        RepoError::GroupNotFound(_)
    ));
}

#[test]
fn update_group_publishes_a_replace() {
    let mut repo = GroupRepository::open_or_seed(MemoryStore::new()).unwrap();
    let kinds = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&kinds);
    let subscription = repo.subscribe_groups(move |change| sink.borrow_mut().push(change.kind()));

    repo.update_group("Calendar", |info| {
        info.set_title("Agenda");
    })
    .unwrap();

    assert_eq!(repo.group("Calendar").unwrap().to_string(), "Agenda");
    assert_eq!(*kinds.borrow(), ["replace"]);
    assert!(repo.unsubscribe_groups(subscription));
}

#[test]
fn group_preview_tracks_item_edits() {
    let mut repo = GroupRepository::open_or_seed(MemoryStore::new()).unwrap();
    for n in 0..TOP_ITEMS_CAPACITY + 2 {
        repo.add_item("Calendar", item(&format!("Task {n}"))).unwrap();
    }

    let calendar = repo.group("Calendar").unwrap();
    assert_eq!(calendar.items().len(), TOP_ITEMS_CAPACITY + 3);
    assert_eq!(calendar.top_items().len(), TOP_ITEMS_CAPACITY);
    assert_eq!(
        calendar.top_items().get(TOP_ITEMS_CAPACITY - 1).unwrap().id(),
        "Task 10"
    );

    repo.remove_item("Hairdresser").unwrap();
    let calendar = repo.group("Calendar").unwrap();
    assert_eq!(calendar.top_items().get(0).unwrap().id(), "Task 0");
    assert_eq!(
        calendar.top_items().get(TOP_ITEMS_CAPACITY - 1).unwrap().id(),
        "Task 11"
    );

    repo.update_item("Task 3", |item| {
        item.set_content("bring umbrella");
    })
    .unwrap();
    let calendar = repo.group("Calendar").unwrap();
    assert_eq!(calendar.top_items().get(3).unwrap().content(), "bring umbrella");
    assert_eq!(
        calendar.top_items().as_slice(),
        &calendar.items().as_slice()[..TOP_ITEMS_CAPACITY]
    );
}

#[test]
fn top_item_subscribers_see_item_updates() {
    let mut repo = GroupRepository::open_or_seed(MemoryStore::new()).unwrap();
    let kinds = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&kinds);
    repo.group_mut("ASAP")
        .unwrap()
        .subscribe_top_items(move |change| sink.borrow_mut().push(change.kind()));

    repo.update_item("Work out", |item| {
        item.info_mut().set_description("50 pushups");
    })
    .unwrap();
    repo.remove_item("Work out").unwrap();

    assert_eq!(*kinds.borrow(), ["replace", "remove"]);
    assert!(repo.group("ASAP").unwrap().top_items().is_empty());
}

#[test]
fn unknown_targets_are_reported() {
    let mut repo = GroupRepository::open_or_seed(MemoryStore::new()).unwrap();

    assert!(matches!(
        repo.add_item("Nowhere", item("Milk")).unwrap_err(),
        RepoError::GroupNotFound(_)
    ));
    assert!(matches!(
        repo.remove_item("Milk").unwrap_err(),
        RepoError::ItemNotFound(_)
    ));
    assert!(matches!(
        repo.update_item("Milk", |_| {}).unwrap_err(),
        RepoError::ItemNotFound(_)
    ));
    assert!(matches!(
        repo.move_item("Work out", "Nowhere", 0).unwrap_err(),
        RepoError::GroupNotFound(_)
    ));
}

#[test]
fn move_within_a_group_reorders() {
    let mut repo = GroupRepository::open_or_seed(MemoryStore::new()).unwrap();

    repo.move_item("Learn Ruby", "Projects", 0).unwrap();

    assert_eq!(item_ids(&repo, "Projects"), ["Learn Ruby", "Learn Windows 8"]);
    let projects = repo.group("Projects").unwrap();
    assert_eq!(projects.top_items().as_slice(), projects.items().as_slice());

    let err = repo.move_item("Learn Ruby", "Projects", 2).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Collection(CollectionError::OutOfRange { index: 2, len: 2 })
    ));
}

#[test]
fn move_across_groups_repoints_the_item() {
    let mut repo = GroupRepository::open_or_seed(MemoryStore::new()).unwrap();

    repo.move_item("Learn Ruby", "ASAP", 0).unwrap();

    assert_eq!(item_ids(&repo, "ASAP"), ["Learn Ruby", "Work out"]);
    assert_eq!(item_ids(&repo, "Projects"), ["Learn Windows 8"]);
    assert_eq!(repo.item("Learn Ruby").unwrap().group_id(), "ASAP");
    assert_eq!(
        repo.group("ASAP").unwrap().top_items().get(0).unwrap().id(),
        "Learn Ruby"
    );

    repo.move_item("Start Blog", "ASAP", 2).unwrap();
    assert_eq!(item_ids(&repo, "ASAP"), ["Learn Ruby", "Work out", "Start Blog"]);
    assert!(repo.group("FutureMaybe").unwrap().items().is_empty());
}

#[test]
fn rejected_cross_group_move_leaves_both_groups_alone() {
    let mut repo = GroupRepository::open_or_seed(MemoryStore::new()).unwrap();

    let err = repo.move_item("Work out", "Waiting", 5).unwrap_err();

    assert!(matches!(
        err,
        RepoError::Collection(CollectionError::OutOfRange { index: 5, len: 1 })
    ));
    assert_eq!(item_ids(&repo, "ASAP"), ["Work out"]);
    assert_eq!(item_ids(&repo, "Waiting"), ["Pay Bills"]);
}

#[test]
fn in_group_edits_through_group_mut_keep_items_reachable() {
    let mut repo = GroupRepository::open_or_seed(MemoryStore::new()).unwrap();

    let projects = repo.group_mut("Projects").unwrap();
    projects.move_item(1, 0).unwrap();
    projects
        .update_item(0, |item| {
            item.set_content("rails first");
        })
        .unwrap();
    let removed = repo.group_mut("ASAP").unwrap().remove_item(0).unwrap();
    repo.add_item("Waiting", removed).unwrap();

    assert_eq!(item_ids(&repo, "Projects"), ["Learn Ruby", "Learn Windows 8"]);
    assert_eq!(repo.item("Learn Ruby").unwrap().content(), "rails first");
    let moved = repo.item("Work out").unwrap();
    assert_eq!(moved.group_id(), "Waiting");
    assert_eq!(item_ids(&repo, "Waiting"), ["Pay Bills", "Work out"]);
    assert!(matches!(
        repo.add_item("ASAP", item("Work out")).unwrap_err(),
        RepoError::DuplicateItemId(_)
    ));
}
