use crate::engine::{
    CellId, ComputeCellId, PropagationStrategy, Reactor, ReactorConfig, ReactorError,
    new_reactor,
};

#[test]
fn input_cells_have_a_value() {
    let mut reactor = Reactor::<i64>::new();
    let input = reactor.create_input(10);
    assert_eq!(reactor.value(input), Some(10));
}

#[test]
fn an_input_cells_value_can_be_set() {
    let mut reactor = Reactor::<i64>::new();
    let input = reactor.create_input(4);
    let summary = reactor.set_value(input, 20).unwrap();
    assert_eq!(reactor.value(input), Some(20));
    assert_eq!(summary.input, input);
    assert!(!summary.is_noop());
    assert_eq!(summary.recomputed, 0);
    assert!(summary.changed.is_empty());

    let again = reactor.set_value(input, 20).unwrap();
    assert!(again.is_noop());
}

#[test]
fn error_setting_a_nonexistent_input_cell() {
    let mut dummy = Reactor::<i64>::new();
    let input = dummy.create_input(1);

    let mut reactor = Reactor::<i64>::new();
    assert_eq!(
        reactor.set_value(input, 0),
        Err(ReactorError::NonexistentCell(CellId::Input(input)))
    );
}

#[test]
fn compute_cells_calculate_initial_value() {
    let mut reactor = Reactor::<i64>::new();
    let input = reactor.create_input(1);
    let output = reactor.create_compute1(input, |v| v + 1).unwrap();
    assert_eq!(reactor.value(output), Some(2));
}

#[test]
fn compute_cells_take_inputs_in_the_right_order() {
    let mut reactor = Reactor::<i64>::new();
    let one = reactor.create_input(1);
    let two = reactor.create_input(2);
    let output = reactor
        .create_compute2(one, two, |a, b| a + b * 10)
        .unwrap();
    assert_eq!(reactor.value(output), Some(21));
}

#[test]
fn n_ary_compute_cells_see_every_dependency() {
    let mut reactor = Reactor::<i64>::new();
    let cells: Vec<CellId> = (1..=4).map(|v| reactor.create_input(v).into()).collect();
    let total = reactor
        .create_compute(&cells, |values| values.iter().sum())
        .unwrap();
    assert_eq!(reactor.value(total), Some(10));
    assert_eq!(reactor.dependencies(total), Some(&cells[..]));
}

#[test]
fn error_creating_compute_cell_if_input_doesnt_exist() {
    let mut dummy = Reactor::<i64>::new();
    let input = dummy.create_input(1);

    let mut reactor = Reactor::<i64>::new();
    assert_eq!(
        reactor.create_compute1(input, |_| 0),
        Err(ReactorError::NonexistentCell(CellId::Input(input)))
    );
}

#[test]
fn do_not_break_cell_if_creating_compute_cell_with_valid_and_invalid_input() {
    let mut dummy = Reactor::<i64>::new();
    let _ = dummy.create_input(1);
    let dummy_cell = dummy.create_input(2);

    let mut reactor = Reactor::<i64>::new();
    let input = reactor.create_input(1);
    assert_eq!(
        reactor.create_compute2(input, dummy_cell, |_, _| 0),
        Err(ReactorError::NonexistentCell(CellId::Input(dummy_cell)))
    );

    assert!(reactor.dependents(input).unwrap().is_empty());
    assert_eq!(reactor.compute_count(), 0);
    reactor.set_value(input, 5).unwrap();
    assert_eq!(reactor.value(input), Some(5));
}

#[test]
fn error_creating_compute_cell_without_dependencies() {
    let mut reactor = Reactor::<i64>::new();
    assert_eq!(
        reactor.create_compute(&[], |_| 1),
        Err(ReactorError::NoDependencies)
    );
}

#[test]
fn out_of_range_handles_read_as_none() {
    let reactor = Reactor::<i64>::new();
    let missing = ComputeCellId::new(reactor.id(), 3);
    assert_eq!(reactor.value(missing), None);
    assert_eq!(reactor.dependencies(missing), None);
    assert_eq!(reactor.dependents(missing), None);
    assert_eq!(reactor.callback_count(missing), None);
}

#[test]
fn handles_from_another_reactor_never_alias_local_cells() {
    let mut other = Reactor::<i64>::new();
    let foreign_input = other.create_input(20);
    let foreign_compute = other.create_compute1(foreign_input, |v| v * 2).unwrap();

    let mut reactor = Reactor::<i64>::new();
    let input = reactor.create_input(10);
    let compute = reactor.create_compute1(input, |v| v + 1).unwrap();
    assert_eq!(input.index(), foreign_input.index());
    assert_eq!(compute.index(), foreign_compute.index());
    assert_ne!(reactor.id(), other.id());

    assert_eq!(reactor.value(foreign_input), None);
    assert_eq!(reactor.value(foreign_compute), None);
    assert_eq!(reactor.dependencies(foreign_compute), None);
    assert_eq!(
        reactor.create_compute1(foreign_input, |v| v),
        Err(ReactorError::NonexistentCell(CellId::Input(foreign_input)))
    );
    assert_eq!(
        reactor.set_value(foreign_input, 0),
        Err(ReactorError::NonexistentCell(CellId::Input(foreign_input)))
    );

    assert_eq!(reactor.value(input), Some(10));
    assert_eq!(reactor.compute_count(), 1);
    assert_eq!(other.value(foreign_compute), Some(40));
}

#[test]
fn dependents_are_recorded_as_back_edges() {
    let mut reactor = Reactor::<i64>::new();
    let a = reactor.create_input(1);
    let b = reactor.create_compute1(a, |v| v * 2).unwrap();
    let c = reactor.create_compute1(a, |v| v * 3).unwrap();
    let d = reactor.create_compute2(b, c, |x, y| x + y).unwrap();

    assert_eq!(reactor.dependents(a), Some(&[b, c][..]));
    assert_eq!(reactor.dependents(b), Some(&[d][..]));
    assert_eq!(reactor.dependents(c), Some(&[d][..]));
    assert!(reactor.dependents(d).unwrap().is_empty());
    assert_eq!(reactor.input_count(), 1);
    assert_eq!(reactor.compute_count(), 3);
}

#[test]
fn config_is_kept_by_the_reactor() {
    let config = ReactorConfig::default()
        .with_strategy(PropagationStrategy::Relaxation)
        .with_cell_capacity(64);
    let reactor: Reactor<'_, i64> = new_reactor(config);
    assert_eq!(reactor.config().strategy, PropagationStrategy::Relaxation);
    assert_eq!(reactor.config().cell_capacity, 64);

    let default = Reactor::<i64>::default();
    assert_eq!(default.config().strategy, PropagationStrategy::Ordered);
}

#[test]
fn reactor_is_generic_over_copy_values() {
    let mut reactor = Reactor::<bool>::new();
    let flag = reactor.create_input(false);
    let negated = reactor.create_compute1(flag, |v| !v).unwrap();
    assert_eq!(reactor.value(negated), Some(true));
    reactor.set_value(flag, true).unwrap();
    assert_eq!(reactor.value(negated), Some(false));
}
