use satchel_core::{
    CharacterId, CharacterSpec, ContainmentRejection, ItemId, ItemSpec, OwnerRef,
    OwnershipError, Placement, Rehome, SlotId, World,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn spawn(world: &mut World, name: &str, slots: usize, capacity: f32) -> CharacterId {
    world
        .spawn_character(CharacterSpec::new(name, 20, capacity).gear_slots(slots))
        .expect("character should spawn")
}

/// A full character refuses a second item and leaves it where it lies.
#[test]
fn overloaded_pick_up_is_a_no_op() {
    init_tracing();
    let mut world = World::default();
    let porter = spawn(&mut world, "Porter", 1, 5.0);
    let first = world.create_item(ItemSpec::weapon(4).with_weight(3.0)).unwrap();
    let second = world.create_item(ItemSpec::weapon(6).with_weight(3.0)).unwrap();

    assert_eq!(world.pick_up(porter, first), Ok(Some(Placement::Anchor(SlotId(0)))));
    assert_eq!(world.holder(first), Some(porter));

    assert_eq!(world.pick_up(porter, second), Ok(None));
    assert_eq!(world.holder(second), None);
    assert_eq!(world.item(second).unwrap().owner(), OwnerRef::None);
    assert_eq!(world.total_weight(porter), Ok(3.0));
    assert_eq!(world.check_invariants(), Ok(()));
}

/// Two backpacks can nest one way but not both.
#[test]
fn nesting_backpacks_back_into_each_other_is_refused() {
    init_tracing();
    let mut world = World::default();
    let a = world.create_item(ItemSpec::backpack(20.0).with_weight(1.0)).unwrap();
    let b = world.create_item(ItemSpec::backpack(10.0).with_weight(1.0)).unwrap();

    world.move_to(a, b).unwrap();
    assert_eq!(
        world.move_to(b, a),
        Err(OwnershipError::InvalidContainment {
            item: b,
            backpack: a,
            reason: ContainmentRejection::Cycle,
        })
    );
    assert_eq!(world.item(a).unwrap().owner(), OwnerRef::Contained(b));
    assert_eq!(world.item(b).unwrap().owner(), OwnerRef::None);
    assert_eq!(world.check_invariants(), Ok(()));
}

/// Unequipping the only backpack drops it with its content intact.
#[test]
fn unequipped_backpack_keeps_its_content_on_the_ground() {
    init_tracing();
    let mut world = World::default();
    let hiker = spawn(&mut world, "Hiker", 1, 30.0);
    let pack = world
        .create_equipped(ItemSpec::backpack(15.0).with_weight(2.0), hiker, SlotId(0))
        .unwrap();
    let dagger = world.create_item(ItemSpec::weapon(3).with_weight(1.0)).unwrap();
    world.move_to(dagger, pack).unwrap();
    assert_eq!(world.holder(dagger), Some(hiker));

    assert_eq!(world.unequip(hiker, SlotId(0)), Ok(Some((pack, Rehome::Ground))));
    assert_eq!(world.item(pack).unwrap().owner(), OwnerRef::None);
    assert!(world.contains(pack, dagger));
    assert_eq!(world.holder(dagger), None);
    assert_eq!(world.total_weight(pack), Ok(3.0));
    assert_eq!(world.total_weight(hiker), Ok(0.0));
    assert_eq!(world.check_invariants(), Ok(()));
}

/// The victor loots what it wants; unwanted gear rots, containers survive.
#[test]
fn looting_a_corpse() {
    init_tracing();
    let mut world = World::default();
    let victor = spawn(&mut world, "Victor", 3, 100.0);
    let corpse = spawn(&mut world, "Brute", 3, 100.0);

    let axe = world
        .create_equipped(ItemSpec::weapon(9).with_weight(4.0), corpse, SlotId(0))
        .unwrap();
    let mail = world
        .create_equipped(ItemSpec::armor(6, 8).with_weight(10.0), corpse, SlotId(1))
        .unwrap();
    let sack = world
        .create_equipped(ItemSpec::backpack(20.0).with_weight(1.0), corpse, SlotId(2))
        .unwrap();
    let knife = world.create_item(ItemSpec::weapon(2).with_weight(1.0)).unwrap();
    let cap = world.create_item(ItemSpec::armor(1, 1).with_weight(1.0)).unwrap();
    world.move_to(knife, sack).unwrap();
    world.move_to(cap, sack).unwrap();

    assert_eq!(world.take_damage(corpse, 50), Ok(true));

    let wants_axe = move |_: &World, _: CharacterId, item: ItemId| item == axe;
    let report = world.collect_treasures(victor, corpse, &wants_axe).unwrap();

    assert_eq!(report.taken, vec![(axe, Placement::Anchor(SlotId(0)))]);
    assert!(report.left_behind.is_empty());
    assert_eq!(world.holder(axe), Some(victor));
    for rotten in [mail, knife, cap] {
        assert!(world.item(rotten).unwrap().is_terminated(), "{rotten} should decay");
        assert_eq!(world.item(rotten).unwrap().owner(), OwnerRef::None);
    }
    assert!(!world.item(sack).unwrap().is_terminated());
    assert_eq!(world.holder(sack), Some(corpse));
    assert_eq!(world.check_invariants(), Ok(()));
}

/// Terminated items stay addressable but take part in nothing.
#[test]
fn terminated_items_are_inert() {
    init_tracing();
    let mut world = World::default();
    let hero = spawn(&mut world, "Hero", 2, 30.0);
    let sack = world.create_item(ItemSpec::backpack(10.0)).unwrap();
    let blade = world.create_item(ItemSpec::weapon(5).with_weight(2.0)).unwrap();
    world.move_to(blade, sack).unwrap();

    world.terminate(sack).unwrap();
    assert!(world.contains(sack, blade));
    assert!(matches!(
        world.move_to(blade, sack),
        Err(OwnershipError::Terminated { item }) if item == sack
    ));
    assert_eq!(world.equip(hero, SlotId(0), sack), Ok(false));
    assert_eq!(world.pick_up(hero, sack), Ok(None));

    world.drop(blade).unwrap();
    assert_eq!(world.pick_up(hero, blade), Ok(Some(Placement::Anchor(SlotId(0)))));
    assert_eq!(world.check_invariants(), Ok(()));
}
