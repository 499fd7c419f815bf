use crate::error::SimError;
use crate::model::{
    Admission, Discipline, FinitePopulation, ModelKind, ModelParams, OpenQueue, QueueModel,
    build_discipline,
};
use crate::sim::{CustomerId, EventKind, EventQueue, FixedDraws, Scheduler, SimTime, Variates};

fn half_draws() -> Variates {
    Variates::new(FixedDraws::new(vec![0.5]))
}

fn admitted(a: Admission) -> CustomerId {
    match a {
        Admission::Admitted(id) => id,
        Admission::Rejected => panic!("expected admission"),
    }
}

#[test]
fn capacity_bound_rejects_when_system_is_full() {
    let params = ModelParams::new(10.0, 2.0).with_capacity(2);
    let mut d = OpenQueue::new(
        ModelKind::Mm1k,
        params.validate(ModelKind::Mm1k).expect("valid"),
    );
    let mut q = EventQueue::new();
    let mut v = half_draws();
    let mut sched = Scheduler::new(SimTime(1.0), &mut q, &mut v);

    let first = admitted(d.on_arrival(&mut sched).expect("arrival"));
    assert_eq!(d.state().busy_servers(), 1);
    assert_eq!(d.state().queue_len(), 0);

    let second = admitted(d.on_arrival(&mut sched).expect("arrival"));
    assert_ne!(first, second);
    assert_eq!(d.state().queue_len(), 1);

    assert_eq!(
        d.on_arrival(&mut sched).expect("arrival"),
        Admission::Rejected
    );
    assert_eq!(d.state().in_system(), 2);
    assert_eq!(d.state().arrivals(), 3);
    assert_eq!(d.state().rejected(), 1);

    // 只有第一个顾客开始了服务，因此只有一个离开事件
    assert_eq!(q.size(), 1);
    let dep = q.extract_min().expect("departure");
    assert_eq!(dep.event().kind, EventKind::Departure);
    assert_eq!(dep.event().customer, Some(first));
}

#[test]
fn departure_frees_server_and_starts_head_of_queue() {
    let params = ModelParams::new(1.0, 2.0).with_servers(1);
    let mut d = OpenQueue::new(
        ModelKind::Mm1,
        params.validate(ModelKind::Mm1).expect("valid"),
    );
    let mut q = EventQueue::new();
    let mut v = half_draws();

    let (first, second) = {
        let mut sched = Scheduler::new(SimTime(0.0), &mut q, &mut v);
        let a = admitted(d.on_arrival(&mut sched).expect("arrival"));
        let b = admitted(d.on_arrival(&mut sched).expect("arrival"));
        (a, b)
    };
    let _ = q.extract_min();

    let mut sched = Scheduler::new(SimTime(0.5), &mut q, &mut v);
    let done = d.on_departure(first, &mut sched).expect("departure");
    assert_eq!(done.id, first);
    assert_eq!(done.service_start_time, Some(SimTime(0.0)));
    assert_eq!(done.wait_time(), Some(0.0));
    assert_eq!(d.state().departures(), 1);
    assert_eq!(d.state().busy_servers(), 1);
    assert_eq!(d.state().queue_len(), 0);

    let next = q.extract_min().expect("departure for second");
    assert_eq!(next.event().customer, Some(second));
    assert!((next.at().as_f64() - (0.5 + std::f64::consts::LN_2 / 2.0)).abs() < 1e-12);
}

#[test]
fn idle_servers_are_used_before_queueing() {
    let params = ModelParams::new(1.0, 1.0).with_servers(3);
    let mut d = OpenQueue::new(ModelKind::Mms, params);
    let mut q = EventQueue::new();
    let mut v = half_draws();
    let mut sched = Scheduler::new(SimTime::ZERO, &mut q, &mut v);
    for _ in 0..4 {
        d.on_arrival(&mut sched).expect("arrival");
    }
    assert_eq!(d.state().busy_servers(), 3);
    assert_eq!(d.state().queue_len(), 1);
    assert_eq!(d.capacity(), None);
    assert_eq!(q.size(), 3);
}

#[test]
fn departure_for_unknown_customer_is_an_error() {
    let mut d = OpenQueue::new(ModelKind::Mm1, ModelParams::new(1.0, 2.0).with_servers(1));
    let mut q = EventQueue::new();
    let mut v = half_draws();
    let mut sched = Scheduler::new(SimTime::ZERO, &mut q, &mut v);
    let err = d.on_departure(CustomerId(99), &mut sched).expect_err("unknown");
    assert_eq!(err, SimError::UnknownCustomer { id: 99 });
}

#[test]
fn finite_population_arrival_rate_tracks_customers_outside() {
    let params = ModelParams::new(0.5, 1.0).with_servers(1).with_population(2);
    let mut d = FinitePopulation::new(params);
    assert_eq!(d.population(), 2);
    assert_eq!(d.initial_arrival_rate(), 1.0);
    assert_eq!(d.next_arrival_rate(), Some(1.0));

    let mut q = EventQueue::new();
    let mut v = half_draws();

    let (first, _second) = {
        let mut sched = Scheduler::new(SimTime(1.0), &mut q, &mut v);
        let a = admitted(d.on_arrival(&mut sched).expect("arrival"));
        assert_eq!(d.state().outside(), Some(1));
        assert_eq!(d.next_arrival_rate(), Some(0.5));

        let b = admitted(d.on_arrival(&mut sched).expect("arrival"));
        assert_eq!(d.state().outside(), Some(0));
        assert_eq!(d.next_arrival_rate(), None);
        (a, b)
    };
    assert_eq!(q.size(), 1);

    let mut sched = Scheduler::new(SimTime(2.0), &mut q, &mut v);
    assert_eq!(
        d.on_arrival(&mut sched).expect_err("no one left outside"),
        SimError::PopulationExhausted
    );

    // 0 → 1：离开同时调度第二位顾客的服务以及重启的到达
    d.on_departure(first, &mut sched).expect("departure");
    assert_eq!(d.state().outside(), Some(1));
    assert_eq!(q.size(), 3);
    let kinds: Vec<EventKind> = std::iter::from_fn(|| q.extract_min())
        .map(|e| e.event().kind)
        .collect();
    assert_eq!(
        kinds.iter().filter(|k| **k == EventKind::Arrival).count(),
        1
    );
}

#[test]
fn reset_restores_initial_state() {
    let model = QueueModel::new(
        ModelKind::Mmsn,
        ModelParams::new(1.0, 1.0).with_servers(1).with_population(3),
    )
    .expect("valid");
    let mut d = build_discipline(&model);
    assert_eq!(d.kind(), ModelKind::Mmsn);
    let mut q = EventQueue::new();
    let mut v = half_draws();
    let mut sched = Scheduler::new(SimTime::ZERO, &mut q, &mut v);
    d.on_arrival(&mut sched).expect("arrival");
    assert_eq!(d.state().outside(), Some(2));

    d.reset();
    assert_eq!(d.state().outside(), Some(3));
    assert_eq!(d.state().in_system(), 0);
    assert_eq!(d.state().arrivals(), 0);
    assert_eq!(d.state().clock(), SimTime::ZERO);
}
