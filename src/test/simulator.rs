use crate::error::{ConfigError, SimError};
use crate::model::{ModelKind, ModelParams, QueueModel};
use crate::sim::{EventKind, FixedDraws, Phase, RunReport, Simulator, TraceRecorder, Variates};
use std::f64::consts::LN_2;

fn model(kind: ModelKind, params: ModelParams) -> QueueModel {
    QueueModel::new(kind, params).expect("valid model")
}

fn run_seeded(
    kind: ModelKind,
    params: ModelParams,
    duration: f64,
    seed: u64,
) -> (RunReport, TraceRecorder) {
    let mut sim =
        Simulator::new(model(kind, params), Variates::seeded(seed)).with_time_series(true);
    let mut trace = TraceRecorder::default();
    let report = sim.run_with_observer(duration, &mut trace).expect("run");
    (report, trace)
}

fn assert_littles_law(r: &RunReport) {
    let m = &r.metrics;
    let tol = 1e-9 * m.l.max(1.0);
    assert!(
        (m.l - m.lambda_eff * m.w).abs() < tol,
        "L={} λ_eff·W={}",
        m.l,
        m.lambda_eff * m.w
    );
    assert!(
        (m.lq - m.lambda_eff * m.wq).abs() < tol,
        "Lq={} λ_eff·Wq={}",
        m.lq,
        m.lambda_eff * m.wq
    );
}

#[test]
fn deterministic_draws_give_exact_mm1_trace() {
    // 所有抽样都是 0.5：到达间隔 ln2，服务时间 ln2/2
    let mut sim = Simulator::new(
        model(ModelKind::Mm1, ModelParams::new(1.0, 2.0)),
        Variates::new(FixedDraws::new(vec![0.5])),
    );
    assert_eq!(sim.phase(), Phase::Idle);

    let mut trace = TraceRecorder::default();
    let report = sim.run_with_observer(2.0, &mut trace).expect("run");
    assert_eq!(sim.phase(), Phase::Finalized);
    assert_eq!(report.events_processed, 4);
    assert_eq!(sim.now().as_f64(), 2.0);
    assert_eq!(sim.model().kind(), ModelKind::Mm1);
    assert_eq!(sim.discipline().kind(), ModelKind::Mm1);
    assert_eq!(sim.discipline().state().in_system(), 0);

    let kinds: Vec<EventKind> = trace.entries.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::Arrival,
            EventKind::Departure,
            EventKind::Arrival,
            EventKind::Departure
        ]
    );
    let times: Vec<f64> = trace.entries.iter().map(|e| e.at.as_f64()).collect();
    let expected = [LN_2, 1.5 * LN_2, 2.0 * LN_2, 2.5 * LN_2];
    for (got, want) in times.iter().zip(expected) {
        assert!((got - want).abs() < 1e-12, "got {got}, want {want}");
    }

    let m = report.metrics;
    assert_eq!(m.served, 2);
    assert_eq!(m.arrivals, 2);
    assert_eq!(m.rejected, 0);
    assert_eq!(m.max_queue, 0);
    assert!((m.l - LN_2 / 2.0).abs() < 1e-12);
    assert_eq!(m.lq, 0.0);
    assert!((m.lambda_eff - 1.0).abs() < 1e-12);
    assert!((m.w - LN_2 / 2.0).abs() < 1e-12);
    assert!((m.rho - LN_2 / 2.0).abs() < 1e-12);
    assert!((m.p0 - (1.0 - LN_2 / 2.0)).abs() < 1e-12);
    assert_eq!(m.total_time, 2.0);
    assert!(report.time_series.is_none());
}

#[test]
fn rerun_resets_state() {
    let mut sim = Simulator::new(
        model(ModelKind::Mm1, ModelParams::new(1.0, 2.0)),
        Variates::new(FixedDraws::new(vec![0.5])),
    );
    let first = sim.run(10.0).expect("run");
    let second = sim.run(10.0).expect("run");
    assert_eq!(first, second);
}

#[test]
fn no_departures_reports_zero_wait_instead_of_nan() {
    // 第一次到达在 ln2/0.001 ≈ 693 之后，远超运行时长
    let mut sim = Simulator::new(
        model(ModelKind::Mm1, ModelParams::new(0.001, 1.0)),
        Variates::new(FixedDraws::new(vec![0.5])),
    );
    let report = sim.run(1.0).expect("run");
    let m = report.metrics;
    assert_eq!(report.events_processed, 0);
    assert_eq!(m.served, 0);
    assert_eq!(m.lambda_eff, 0.0);
    assert_eq!(m.w, 0.0);
    assert_eq!(m.wq, 0.0);
    assert_eq!(m.l, 0.0);
    assert_eq!(m.p0, 1.0);
    assert!(m.w.is_finite() && m.wq.is_finite());
}

#[test]
fn invalid_duration_is_rejected_before_running() {
    let mut sim = Simulator::new(
        model(ModelKind::Mm1, ModelParams::new(1.0, 2.0)),
        Variates::seeded(1),
    );
    for d in [0.0, -5.0, f64::NAN] {
        let err = sim.run(d).expect_err("invalid duration");
        assert!(matches!(err, SimError::Config(ConfigError::NonPositiveDuration(_))));
    }
    assert_eq!(sim.phase(), Phase::Idle);
    assert_eq!(sim.pending_events(), 0);
}

#[test]
fn mm1_scenario_matches_offered_load() {
    let (r, trace) = run_seeded(ModelKind::Mm1, ModelParams::new(2.0, 5.0), 1000.0, 42);
    let m = r.metrics;
    assert!((m.rho - 0.4).abs() < 0.12, "rho = {}", m.rho);
    assert_eq!(m.rejected, 0);
    assert!(trace.entries.iter().all(|e| !e.rejected));
    assert!(m.served > 0);
    assert_littles_law(&r);

    let series = r.time_series.expect("time series");
    assert!(!series.is_empty() && series.len() <= 101, "samples = {}", series.len());
    assert!(series.samples.windows(2).all(|w| w[0].t <= w[1].t));
}

#[test]
fn mm1k_scenario_blocks_and_never_exceeds_capacity() {
    let params = ModelParams::new(10.0, 2.0).with_capacity(3);
    let (r, trace) = run_seeded(ModelKind::Mm1k, params, 1000.0, 7);
    let m = r.metrics;

    assert!(m.rejected > 0);
    assert!(m.max_queue <= 2);
    assert!(trace.entries.iter().all(|e| e.after.in_system <= 3));
    // 拒绝不改变状态，所以拒绝后的占用就是到达时的占用
    assert!(
        trace
            .entries
            .iter()
            .filter(|e| e.rejected)
            .all(|e| e.after.in_system == 3)
    );
    assert_eq!(
        trace.entries.iter().filter(|e| e.rejected).count() as u64,
        m.rejected
    );
    assert_eq!(
        m.served + m.rejected + m.in_system_at_end as u64,
        m.arrivals
    );
    assert!(m.rejection_rate > 0.0 && m.rejection_rate < 1.0);
    assert_littles_law(&r);
}

#[test]
fn mmsn_scenario_conserves_population() {
    let params = ModelParams::new(1.0, 1.0).with_servers(2).with_population(5);
    let (r, trace) = run_seeded(ModelKind::Mmsn, params, 1000.0, 3);

    assert!(!trace.entries.is_empty());
    for e in &trace.entries {
        let outside = e.after.outside.expect("finite population");
        assert_eq!(outside + e.after.in_system, 5, "at t={}", e.at.as_f64());
        assert!(e.after.busy <= 2);
    }
    let series = r.time_series.as_ref().expect("time series");
    for s in &series.samples {
        assert_eq!(s.outside.expect("finite population") + s.l, 5);
    }
    let m = r.metrics;
    assert_eq!(m.rejected, 0);
    assert_eq!(m.outside_at_end.expect("outside") + m.in_system_at_end, 5);
    assert_littles_law(&r);
}

#[test]
fn mmsn_rearms_arrivals_after_population_is_exhausted() {
    // N = 1：每次到达都会清空总体，只能依靠离开时的重启继续到达。
    // 重启只在 0 → 1 时发生，这是已知的建模简化。
    let params = ModelParams::new(2.0, 2.0).with_servers(1).with_population(1);
    let (r, trace) = run_seeded(ModelKind::Mmsn, params, 500.0, 9);
    let m = r.metrics;
    assert!(m.arrivals > 100, "arrivals = {}", m.arrivals);
    assert!(m.served + 1 >= m.arrivals);
    assert!(trace.entries.iter().all(|e| e.after.in_system <= 1));
}

#[test]
fn fixed_draws_make_runs_reproducible() {
    let draws = vec![0.1, 0.7, 0.35, 0.9, 0.5, 0.23, 0.61, 0.05, 0.82, 0.44, 0.67];
    let params = ModelParams::new(3.0, 1.0).with_servers(2).with_capacity(4);
    let run = || {
        let mut sim = Simulator::new(
            model(ModelKind::Mmsk, params),
            Variates::new(FixedDraws::new(draws.clone())),
        )
        .with_time_series(true);
        let mut trace = TraceRecorder::default();
        let report = sim.run_with_observer(200.0, &mut trace).expect("run");
        (report, trace.entries)
    };
    let (a, trace_a) = run();
    let (b, trace_b) = run();
    assert!(!trace_a.is_empty());
    assert_eq!(trace_a, trace_b);
    assert_eq!(a, b);
    assert!(
        trace_a
            .iter()
            .all(|e| e.after.in_system <= 4 && e.after.busy <= 2)
    );
    assert!(
        trace_a
            .iter()
            .filter(|e| e.rejected)
            .all(|e| e.after.in_system == 4)
    );
}

#[test]
fn mmsk_scenario_blocks_only_when_full() {
    let params = ModelParams::new(10.0, 1.0).with_servers(2).with_capacity(4);
    let (r, trace) = run_seeded(ModelKind::Mmsk, params, 500.0, 11);
    let m = r.metrics;

    assert!(m.rejected > 0);
    assert!(m.max_queue <= 2);
    for e in &trace.entries {
        assert!(e.after.in_system <= 4, "at t={}", e.at.as_f64());
        assert!(e.after.busy <= 2);
        assert_eq!(e.after.queue_len + e.after.busy, e.after.in_system);
    }
    assert!(
        trace
            .entries
            .iter()
            .filter(|e| e.rejected)
            .all(|e| e.after.in_system == 4)
    );
    assert_eq!(
        trace.entries.iter().filter(|e| e.rejected).count() as u64,
        m.rejected
    );
    assert_eq!(
        m.served + m.rejected + m.in_system_at_end as u64,
        m.arrivals
    );
    assert_littles_law(&r);
}

#[test]
fn littles_law_holds_for_every_model() {
    let cases = [
        (ModelKind::Mm1, ModelParams::new(2.0, 3.0)),
        (ModelKind::Mm1k, ModelParams::new(4.0, 3.0).with_capacity(5)),
        (ModelKind::Mms, ModelParams::new(5.0, 2.0).with_servers(3)),
        (
            ModelKind::Mmsk,
            ModelParams::new(5.0, 2.0).with_servers(2).with_capacity(6),
        ),
        (
            ModelKind::Mmsn,
            ModelParams::new(0.5, 1.0).with_servers(2).with_population(8),
        ),
    ];
    for (i, (kind, params)) in cases.into_iter().enumerate() {
        let (r, _) = run_seeded(kind, params, 500.0, 100 + i as u64);
        assert_littles_law(&r);
        let m = r.metrics;
        assert!(m.rho >= 0.0 && m.rho <= 1.0, "{kind}: rho = {}", m.rho);
        assert!(m.p0 >= 0.0 && m.p0 <= 1.0);
        assert!(m.lq <= m.l);
    }
}
