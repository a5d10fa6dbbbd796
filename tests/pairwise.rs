//! End-to-end scenarios through the public API.

use std::sync::Arc;

use approx::assert_abs_diff_eq;
use tda_diagram_metrics::logging::init_test_subscriber;
use tda_diagram_metrics::{
    persistence_fisher_distance, sliced_wasserstein_distance, DistanceDispatcher, DistanceEstimator,
    ExactBackends, ExactDistanceBackend, MetricConfig, MetricError, PersistenceDiagram,
    PersistenceFisherDistance, PersistenceInterval, Result, SlicedWassersteinDistance,
};

fn collection() -> Vec<PersistenceDiagram> {
    vec![
        PersistenceDiagram::from_points(&[(0.0, 1.0)]).unwrap(),
        PersistenceDiagram::from_points(&[(0.0, 1.2), (0.3, 0.4)]).unwrap(),
        PersistenceDiagram::from_points(&[(2.0, 5.0), (1.0, 1.1), (0.5, 3.0)]).unwrap(),
    ]
}

/// Half the gap between the longest lifetimes; stands in for a real solver
#[derive(Debug)]
struct MaxPersistenceBackend;

impl ExactDistanceBackend for MaxPersistenceBackend {
    fn name(&self) -> &str {
        "max-persistence"
    }

    fn bottleneck(
        &self,
        d1: &PersistenceDiagram,
        d2: &PersistenceDiagram,
        _: Option<f64>,
    ) -> Result<f64> {
        let longest = |d: &PersistenceDiagram| d.iter().map(|(b, e)| e - b).fold(0.0, f64::max);
        Ok((longest(d1) - longest(d2)).abs() / 2.0)
    }
}

#[test]
fn single_point_against_empty_diagram() {
    let d1 = PersistenceDiagram::from_points(&[(0.0, 1.0)]).unwrap();
    let d2 = PersistenceDiagram::empty();

    let dist = sliced_wasserstein_distance(&d1, &d2, 4).unwrap();

    // |proj((0,1), θ) - proj((0.5,0.5), θ)| for θ = -π/2, -π/4, 0, π/4
    let expected = (0.5 + 0.5_f64.sqrt() + 0.5 + 0.0) / 4.0;
    assert_abs_diff_eq!(dist, expected, epsilon = 1e-12);
}

#[test]
fn fisher_identical_single_points() {
    let d1 = PersistenceDiagram::from_points(&[(0.0, 1.0)]).unwrap();
    let d2 = PersistenceDiagram::from_points(&[(0.0, 1.0)]).unwrap();

    for bandwidth in [0.01, 0.5, 1.0, 10.0] {
        assert_abs_diff_eq!(
            persistence_fisher_distance(&d1, &d2, bandwidth).unwrap(),
            0.0,
            epsilon = 1e-6
        );
    }
}

#[test]
fn named_metrics_from_config() {
    let _guard = init_test_subscriber();
    let x = collection();
    let dispatcher = DistanceDispatcher::new();

    let config = MetricConfig::from_json_str(r#"{ "num_directions": 25 }"#).unwrap();
    let sliced = dispatcher.pairwise_named(&x, None, "sliced_wasserstein", &config).unwrap();
    assert_abs_diff_eq!(
        sliced[[0, 2]],
        sliced_wasserstein_distance(&x[0], &x[2], 25).unwrap(),
        epsilon = 1e-12
    );

    let fisher = dispatcher.pairwise_named(&x, None, "persistence_fisher", &config).unwrap();
    for i in 0..x.len() {
        assert!(fisher[[i, i]].abs() < 1e-6);
        for j in 0..x.len() {
            assert!(fisher[[i, j]] >= 0.0 && fisher[[i, j]] <= std::f64::consts::FRAC_PI_2);
        }
    }

    let err = dispatcher.pairwise_named(&x, None, "not_a_metric", &config).unwrap_err();
    assert!(matches!(err, MetricError::UnknownMetric(ref name) if name == "not_a_metric"));
}

#[test]
fn exact_metrics_need_backends() {
    let _guard = init_test_subscriber();
    let x = collection();
    let config = MetricConfig::default();

    for name in ["bottleneck", "wasserstein", "hera_wasserstein", "pot_wasserstein"] {
        let err = DistanceDispatcher::new().pairwise_named(&x, None, name, &config).unwrap_err();
        assert!(
            matches!(err, MetricError::DependencyMissing { .. }),
            "{} returned {:?}",
            name,
            err
        );
    }

    let dispatcher = DistanceDispatcher::new()
        .with_backends(ExactBackends::new().with_bottleneck(Arc::new(MaxPersistenceBackend)));
    let matrix = dispatcher.pairwise_named(&x, None, "bottleneck", &config).unwrap();
    assert_abs_diff_eq!(matrix[[0, 2]], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(matrix[[2, 0]], 1.0, epsilon = 1e-12);
}

#[test]
fn estimators_over_interval_input() {
    let intervals = [
        PersistenceInterval::new(0.0, f64::INFINITY, 0),
        PersistenceInterval::new(0.0, 0.7, 0),
        PersistenceInterval::new(0.1, 0.3, 0),
        PersistenceInterval::new(0.2, 0.9, 1),
    ];
    let h0 = PersistenceDiagram::from_intervals(&intervals, 0).unwrap();
    let h1 = PersistenceDiagram::from_intervals(&intervals, 1).unwrap();
    let train = vec![h0.clone(), h1.clone()];

    let mut sliced = SlicedWassersteinDistance::new(20);
    sliced.fit(&train);
    let matrix = sliced.transform(&[h1.clone()]).unwrap();
    assert_eq!(matrix.dim(), (1, 2));
    assert_eq!(matrix[[0, 1]], 0.0);
    assert!(matrix[[0, 0]] > 0.0);

    let mut fisher = PersistenceFisherDistance::default();
    let matrix = fisher.fit_transform(&train).unwrap();
    assert_abs_diff_eq!(matrix[[0, 1]], matrix[[1, 0]], epsilon = 1e-9);
}
