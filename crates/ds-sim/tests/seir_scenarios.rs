//! Integration tests: SEIR runs over the documented scenarios and invariants.

use std::ops::ControlFlow;

use ds_core::{Tolerances, nearly_equal};
use ds_model::{ParameterSet, RawParameters, SeasonalForcing, TimeSeries};
use ds_sim::{IntegratorType, SeirModel, SeirOptions, SimError, simulate, simulate_with_progress};

fn scenario_a() -> RawParameters {
    RawParameters {
        population: 1000.0,
        initial_exposed: 0.0,
        initial_infected: 1.0,
        initial_recovered: 0.0,
        incubation_days: 5.0,
        infectious_days: 7.0,
        duration_days: 120.0,
        seasonal_strength: 0.0,
        beta0: 0.4,
    }
}

fn run(raw: &RawParameters, opts: &SeirOptions) -> TimeSeries {
    let params = ParameterSet::new(raw).expect("valid parameters");
    simulate(&params, opts).expect("simulation should succeed")
}

fn peak_day(series: &TimeSeries) -> usize {
    let mut best = 0;
    for (idx, rec) in series.iter().enumerate() {
        if rec.i > series.records()[best].i {
            best = idx;
        }
    }
    best
}

#[test]
fn series_covers_every_day_including_day_zero() {
    let series = run(&scenario_a(), &SeirOptions::default());
    assert_eq!(series.len(), 121);
    for (idx, rec) in series.iter().enumerate() {
        assert_eq!(rec.day, idx);
    }
    let first = series.first().unwrap();
    assert_eq!((first.s, first.e, first.i, first.r), (999.0, 0.0, 1.0, 0.0));
}

#[test]
fn scenario_a_outbreak_rises_and_peaks() {
    let series = run(&scenario_a(), &SeirOptions::default());
    let peak = peak_day(&series);
    assert!(peak > 0 && peak < 120, "peak day {peak}");
    assert!(series.records()[peak].i > 1.0);

    let s_final = series.last().unwrap().s;
    let cases = 999.0 - s_final;
    assert!(cases > 1.0 && cases <= 1000.0, "cases {cases}");
}

#[test]
fn scenario_b_seasonality_moves_the_peak() {
    let flat = run(&scenario_a(), &SeirOptions::default());
    let seasonal = run(
        &RawParameters {
            seasonal_strength: 0.5,
            ..scenario_a()
        },
        &SeirOptions::default(),
    );
    // beta rises during the first quarter of the year, so the seasonal outbreak peaks earlier
    assert!(peak_day(&seasonal) < peak_day(&flat));
}

#[test]
fn population_is_conserved() {
    for strength in [0.0, 0.5, 1.0] {
        let series = run(
            &RawParameters {
                seasonal_strength: strength,
                duration_days: 730.0,
                ..scenario_a()
            },
            &SeirOptions::default(),
        );
        for rec in &series {
            let total = rec.s + rec.e + rec.i + rec.r;
            assert!(
                nearly_equal(total, 1000.0, Tolerances::CONSERVATION),
                "day {} total {total}",
                rec.day
            );
        }
    }
}

#[test]
fn susceptibles_never_increase() {
    let series = run(
        &RawParameters {
            seasonal_strength: 0.8,
            duration_days: 365.0,
            ..scenario_a()
        },
        &SeirOptions::default(),
    );
    for pair in series.records().windows(2) {
        assert!(pair[1].s <= pair[0].s, "day {}", pair[1].day);
    }
}

#[test]
fn runs_are_deterministic() {
    let raw = RawParameters {
        seasonal_strength: 0.3,
        ..scenario_a()
    };
    let a = run(&raw, &SeirOptions::default());
    let b = run(&raw, &SeirOptions::default());
    assert_eq!(a, b);
}

#[test]
fn recorded_beta_follows_forcing() {
    let raw = RawParameters {
        seasonal_strength: 0.5,
        ..scenario_a()
    };
    let series = run(&raw, &SeirOptions::default());
    let forcing = SeasonalForcing::new(0.4, 0.5);
    for rec in &series {
        assert_eq!(rec.beta, forcing.beta_at(rec.day as f64));
    }
}

#[test]
fn euler_reproduces_the_day_step_recurrence() {
    let raw = RawParameters {
        seasonal_strength: 0.4,
        ..scenario_a()
    };
    let params = ParameterSet::new(&raw).unwrap();
    let opts = SeirOptions {
        integrator: IntegratorType::ForwardEuler,
        ..SeirOptions::default()
    };
    let series = simulate(&params, &opts).unwrap();
    let model = SeirModel::new(&params);

    for pair in series.records().windows(2) {
        let expected = model.euler_day(pair[0].beta, &pair[0].state());
        assert_eq!(pair[1].state(), expected, "day {}", pair[1].day);
    }
}

#[test]
fn rk4_and_euler_agree_roughly() {
    let euler = run(
        &scenario_a(),
        &SeirOptions {
            integrator: IntegratorType::ForwardEuler,
            ..SeirOptions::default()
        },
    );
    let rk4 = run(&scenario_a(), &SeirOptions::default());
    let diff = (peak_day(&euler) as i64 - peak_day(&rk4) as i64).abs();
    assert!(diff <= 8, "euler and rk4 peaks differ by {diff} days");
}

#[test]
fn violent_transmission_stays_non_negative() {
    let raw = RawParameters {
        population: 1000.0,
        initial_infected: 500.0,
        beta0: 20.0,
        incubation_days: 0.5,
        infectious_days: 0.5,
        duration_days: 60.0,
        ..scenario_a()
    };
    let params = ParameterSet::new(&raw).unwrap();
    let opts = SeirOptions {
        integrator: IntegratorType::ForwardEuler,
        ..SeirOptions::default()
    };
    let run = simulate_with_progress(&params, &opts, None).unwrap();
    assert!(run.stats.cutbacks > 0, "expected undershoot cut-backs");

    for rec in &run.series {
        assert!(rec.s >= 0.0 && rec.e >= 0.0 && rec.i >= 0.0 && rec.r >= 0.0);
        assert!(nearly_equal(
            rec.s + rec.e + rec.i + rec.r,
            1000.0,
            Tolerances::CONSERVATION
        ));
    }
}

fn assert_physical(series: &TimeSeries, label: &str) {
    for rec in series {
        assert!(
            rec.s >= 0.0 && rec.e >= 0.0 && rec.i >= 0.0 && rec.r >= 0.0,
            "{label}: negative compartment on day {}",
            rec.day
        );
        assert!(
            nearly_equal(rec.s + rec.e + rec.i + rec.r, 1000.0, Tolerances::CONSERVATION),
            "{label}: population drifted on day {}",
            rec.day
        );
    }
    for pair in series.records().windows(2) {
        assert!(
            pair[1].s <= pair[0].s,
            "{label}: S rose from {} to {} on day {}",
            pair[0].s,
            pair[1].s,
            pair[1].day
        );
    }
}

#[test]
fn stiff_outbreak_keeps_susceptibles_draining() {
    let raw = RawParameters {
        population: 1000.0,
        initial_infected: 999.0,
        incubation_days: 0.1,
        infectious_days: 0.1,
        seasonal_strength: 1.0,
        beta0: 50.0,
        duration_days: 60.0,
        ..scenario_a()
    };
    let params = ParameterSet::new(&raw).unwrap();

    let cases = [
        ("rk4", SeirOptions::default()),
        (
            "rk4 without cut-backs",
            SeirOptions {
                max_cutbacks: 0,
                ..SeirOptions::default()
            },
        ),
        (
            "euler",
            SeirOptions {
                integrator: IntegratorType::ForwardEuler,
                ..SeirOptions::default()
            },
        ),
        (
            "euler without cut-backs",
            SeirOptions {
                integrator: IntegratorType::ForwardEuler,
                max_cutbacks: 0,
                ..SeirOptions::default()
            },
        ),
    ];
    for (label, opts) in cases {
        let run = simulate_with_progress(&params, &opts, None).unwrap();
        assert_eq!(run.series.len(), 61, "{label}");
        assert_physical(&run.series, label);
        if opts.max_cutbacks == 0 {
            assert!(run.stats.repairs > 0, "{label}: expected repairs");
        }
    }
}

#[test]
fn cancellation_stops_the_run() {
    let params = ParameterSet::new(&scenario_a()).unwrap();
    let mut cb = |p: &ds_sim::SimProgress| {
        if p.step >= 10 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    };
    let err = simulate_with_progress(&params, &SeirOptions::default(), Some(&mut cb)).unwrap_err();
    assert!(matches!(err, SimError::Cancelled { steps_done: 10, .. }));
}

#[test]
fn zero_initial_infection_stays_flat() {
    let raw = RawParameters {
        initial_infected: 0.0,
        ..scenario_a()
    };
    let series = run(&raw, &SeirOptions::default());
    for rec in &series {
        assert_eq!(rec.s, 1000.0);
        assert_eq!(rec.i, 0.0);
    }
}
