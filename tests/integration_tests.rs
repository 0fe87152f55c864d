//! Integration tests for the kperceptron library
//!
//! These tests exercise the full path: kernel matrix construction, index maps,
//! training, prediction and evaluation.

use approx::assert_relative_eq;
use kperceptron::api::Perceptron;
use kperceptron::{
    gram_matrix, ClassificationMethod, Dataset, KernelIndex, KernelPerceptron, KernelType,
    LabelledDataset, PerceptronConfig, PerceptronError, PolynomialKernel, StopReason,
};
use ndarray::array;
use std::sync::Arc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn binary_split() -> (LabelledDataset, LabelledDataset) {
    let train = LabelledDataset::new(
        vec![vec![1.0, 1.0], vec![2.0, 1.0], vec![-1.0, -1.0], vec![-1.0, -2.0]],
        vec![0, 0, 1, 1],
    )
    .expect("valid dataset");
    let test = LabelledDataset::new(vec![vec![1.5, 1.0], vec![-1.0, -1.5]], vec![0, 1])
        .expect("valid dataset");
    (train, test)
}

/// Three well separated clusters, three training points each
fn three_clusters() -> (LabelledDataset, LabelledDataset) {
    let train = LabelledDataset::new(
        vec![
            vec![0.0, 5.0],
            vec![0.5, 5.5],
            vec![-0.5, 4.5],
            vec![5.0, 0.0],
            vec![5.5, 0.5],
            vec![4.5, -0.5],
            vec![-5.0, -5.0],
            vec![-5.5, -4.5],
            vec![-4.5, -5.5],
        ],
        vec![0, 0, 0, 1, 1, 1, 2, 2, 2],
    )
    .expect("valid dataset");
    let test = LabelledDataset::new(
        vec![vec![0.2, 5.1], vec![5.1, 0.2], vec![-5.1, -4.9]],
        vec![0, 1, 2],
    )
    .expect("valid dataset");
    (train, test)
}

fn build(
    train: &LabelledDataset,
    test: &LabelledDataset,
    nclasses: usize,
    kernel: KernelType,
    method: ClassificationMethod,
) -> KernelPerceptron {
    let kernel_matrix = gram_matrix(&kernel, &train.concat_points(test)).expect("kernel matrix");
    KernelPerceptron::new(
        PerceptronConfig::new(nclasses)
            .with_method(method)
            .with_kernel_param(kernel.param()),
        Arc::new(kernel_matrix),
        train,
        test,
        KernelIndex::contiguous(train.size(), test.size()),
    )
    .expect("valid classifier")
}

/// Separable binary data with a linear kernel reaches zero train error
#[test]
fn test_binary_separable_converges() {
    init_logging();
    let (train, test) = binary_split();

    for method in [ClassificationMethod::OneVsAll, ClassificationMethod::OneVsOne] {
        let mut model = build(&train, &test, 2, KernelType::Polynomial { degree: 1 }, method);
        let report = model.train_with_report(50, 1e-5).expect("training succeeds");

        assert_eq!(report.train_error, 0.0, "{method} should separate the data");
        assert_eq!(report.stop_reason, StopReason::Converged);
        assert!(report.epochs_run < 50);

        let train_points: Vec<usize> = model.kernel_index().train().to_vec();
        assert_eq!(model.predict(&train_points).unwrap(), train.labels());
        assert_eq!(model.predict_test(), test.labels());
        assert_eq!(model.test_error(), 0.0);
    }
}

#[test]
fn test_ovo_pair_index_order() {
    let (train, test) = three_clusters();
    let model = build(
        &train,
        &test,
        3,
        KernelType::Gaussian { gamma: 0.5 },
        ClassificationMethod::OneVsOne,
    );

    assert_eq!(model.pair_index().unwrap(), &[(0, 1), (0, 2), (1, 2)]);
    assert_eq!(model.weights().dim(), (3, 9));
}

#[test]
fn test_three_class_gaussian_ova() {
    init_logging();
    let (train, test) = three_clusters();
    let mut model = build(
        &train,
        &test,
        3,
        KernelType::Gaussian { gamma: 0.5 },
        ClassificationMethod::OneVsAll,
    );

    let report = model.train_with_report(50, 1e-5).unwrap();

    assert_eq!(report.epochs_run, 4);
    assert_relative_eq!(report.history[0].train_error, 6.0 / 9.0);
    assert_relative_eq!(report.history[1].train_error, 2.0 / 9.0);
    assert_eq!(report.train_error, 0.0);
    assert_eq!(model.predict(&(0..9).collect::<Vec<_>>()).unwrap(), train.labels());
    assert_eq!(model.predict_test(), vec![0, 1, 2]);
}

#[test]
fn test_three_class_gaussian_ovo() {
    let (train, test) = three_clusters();
    let mut model = build(
        &train,
        &test,
        3,
        KernelType::Gaussian { gamma: 0.5 },
        ClassificationMethod::OneVsOne,
    );

    let train_error = model.train(50, 1e-5).unwrap();

    assert_eq!(train_error, 0.0);
    // Only the first example of each class needed an update
    assert_eq!(
        model.weights(),
        &array![
            [1.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, -1.0, 0.0, 0.0],
        ]
    );
    assert_eq!(model.predict_test(), vec![0, 1, 2]);
}

/// Identical feature vectors carrying different labels can never be separated
#[test]
fn test_non_separable_never_reaches_zero_error() {
    init_logging();
    let train = LabelledDataset::new(vec![vec![1.0, 1.0]; 4], vec![0, 0, 1, 1]).unwrap();
    let test = LabelledDataset::new(vec![vec![1.0, 1.0]], vec![0]).unwrap();

    for method in [ClassificationMethod::OneVsAll, ClassificationMethod::OneVsOne] {
        // A single epoch can only end through the epoch budget
        let mut model = build(&train, &test, 2, KernelType::Polynomial { degree: 1 }, method);
        let report = model.train_with_report(1, 1e-5).unwrap();
        assert_eq!(report.stop_reason, StopReason::MaxEpochs);
        assert!(report.train_error > 0.0);

        // With more epochs the error stops improving, which halts training
        let mut model = build(&train, &test, 2, KernelType::Polynomial { degree: 1 }, method);
        let report = model.train_with_report(50, 1e-5).unwrap();
        assert!(report.train_error > 0.0);
        assert_eq!(report.epochs_run, 2);
        assert_ne!(report.stop_reason, StopReason::MaxEpochs);
    }
}

#[test]
fn test_non_separable_error_values() {
    let train = LabelledDataset::new(vec![vec![1.0, 1.0]; 4], vec![0, 0, 1, 1]).unwrap();
    let test = LabelledDataset::new(vec![vec![1.0, 1.0]], vec![0]).unwrap();

    let mut ova = build(
        &train,
        &test,
        2,
        KernelType::Polynomial { degree: 1 },
        ClassificationMethod::OneVsAll,
    );
    let report = ova.train_with_report(50, 1e-5).unwrap();
    assert_eq!(report.train_errors(), vec![0.75, 1.0]);
    assert_eq!(report.test_errors(), vec![1.0, 1.0]);

    let mut ovo = build(
        &train,
        &test,
        2,
        KernelType::Polynomial { degree: 1 },
        ClassificationMethod::OneVsOne,
    );
    assert_eq!(ovo.train(50, 1e-5).unwrap(), 0.5);
}

/// Test error rising while train error keeps falling stops training
#[test]
fn test_test_error_regression_guard() {
    init_logging();
    let train = LabelledDataset::new(
        vec![
            vec![-2.0, 0.0],
            vec![3.0, -1.0],
            vec![-2.0, -2.0],
            vec![0.0, -3.0],
            vec![2.0, -1.0],
            vec![3.0, -2.0],
        ],
        vec![0, 1, 0, 0, 1, 0],
    )
    .unwrap();
    let test = LabelledDataset::new(vec![vec![0.0, 0.0], vec![-2.0, 1.0]], vec![1, 1]).unwrap();

    let mut model = build(
        &train,
        &test,
        2,
        KernelType::Polynomial { degree: 1 },
        ClassificationMethod::OneVsAll,
    );
    let report = model.train_with_report(50, 1e-5).unwrap();

    assert_eq!(report.stop_reason, StopReason::TestErrorRegression);
    assert_eq!(report.epochs_run, 5);
    assert_relative_eq!(report.train_error, 1.0 / 6.0);
    assert_eq!(report.test_errors(), vec![0.5, 0.5, 0.5, 0.5, 1.0]);

    // The weights of the regressed epoch are kept
    assert_eq!(model.test_error(), 1.0);
}

/// Train errors never increase on separable data until the stop fires
#[test]
fn test_train_error_non_increasing_on_separable_data() {
    let (train, test) = three_clusters();
    for method in [ClassificationMethod::OneVsAll, ClassificationMethod::OneVsOne] {
        let mut model = build(&train, &test, 3, KernelType::Gaussian { gamma: 0.5 }, method);
        let errors = model.train_with_report(50, 1e-5).unwrap().train_errors();
        assert!(errors.windows(2).all(|w| w[1] <= w[0]), "{errors:?}");
    }
}

#[test]
fn test_predictions_are_valid_and_idempotent() {
    let (train, test) = three_clusters();
    for method in [ClassificationMethod::OneVsAll, ClassificationMethod::OneVsOne] {
        let mut model = build(&train, &test, 3, KernelType::Polynomial { degree: 2 }, method);
        model.train(5, 1e-5).unwrap();

        let points: Vec<usize> = (0..12).collect();
        let first = model.predict(&points).unwrap();
        let second = model.predict(&points).unwrap();

        assert_eq!(first.len(), points.len());
        assert!(first.iter().all(|&label| label < 3));
        assert_eq!(first, second);
    }
}

#[test]
fn test_confusion_matrix_properties() {
    let (train, test) = three_clusters();
    let mut model = build(
        &train,
        &test,
        3,
        KernelType::Polynomial { degree: 1 },
        ClassificationMethod::OneVsAll,
    );
    model.train(3, 1e-5).unwrap();

    let confusion = model.confusion_matrix();
    let counts = test.class_counts(3);
    for y in 0..3 {
        assert_eq!(confusion[[y, y]], 0.0);
        let row_sum: f64 = confusion.row(y).iter().sum();
        assert!(row_sum <= 1.0 + 1e-12);
        for predicted in 0..3 {
            assert!(confusion[[y, predicted]] * counts[y] as f64 <= counts[y] as f64);
        }
    }
}

#[test]
fn test_count_mistake_vec_properties() {
    let (train, test) = three_clusters();
    let model = build(
        &train,
        &test,
        3,
        KernelType::Gaussian { gamma: 0.5 },
        ClassificationMethod::OneVsAll,
    );

    // Untrained OvA predicts class 0 everywhere: test points 10 and 11 are wrong
    let counts = model.count_mistake_vec();
    assert_eq!(counts.len(), model.kernel_matrix().nrows());
    assert_eq!(counts.len(), 12);
    assert!(counts[..10].iter().all(|&c| c == 0));
    assert_eq!(&counts[10..], &[1, 1]);
}

/// Index maps may point anywhere in a shared kernel matrix
#[test]
fn test_non_contiguous_index_maps() {
    let (train, test) = binary_split();

    // Kernel matrix ordered as test points first, then training points
    let points = test.concat_points(&train);
    let kernel_matrix = Arc::new(gram_matrix(&PolynomialKernel::linear(), &points).unwrap());
    let mut shuffled = KernelPerceptron::new(
        PerceptronConfig::new(2),
        Arc::clone(&kernel_matrix),
        &train,
        &test,
        KernelIndex::new(vec![2, 3, 4, 5], vec![0, 1]),
    )
    .unwrap();

    let mut contiguous = build(
        &train,
        &test,
        2,
        KernelType::Polynomial { degree: 1 },
        ClassificationMethod::OneVsAll,
    );

    shuffled.train(50, 1e-5).unwrap();
    contiguous.train(50, 1e-5).unwrap();

    assert_eq!(shuffled.weights(), contiguous.weights());
    assert_eq!(shuffled.predict_test(), contiguous.predict_test());
    assert_eq!(shuffled.count_mistake_vec(), vec![0; 6]);
}

#[test]
fn test_invalid_configurations() {
    let (train, test) = binary_split();
    let kernel_matrix = Arc::new(
        gram_matrix(&PolynomialKernel::linear(), &train.concat_points(&test)).unwrap(),
    );

    let single_class = KernelPerceptron::new(
        PerceptronConfig::new(1),
        Arc::clone(&kernel_matrix),
        &train,
        &test,
        KernelIndex::contiguous(4, 2),
    );
    assert!(matches!(single_class, Err(PerceptronError::InvalidConfiguration(_))));

    let bad_method = "OvR".parse::<ClassificationMethod>();
    assert!(matches!(bad_method, Err(PerceptronError::InvalidConfiguration(_))));

    let bad_kernel = KernelType::from_name("laplacian", 1.0);
    assert!(matches!(bad_kernel, Err(PerceptronError::UnsupportedKernel(_))));

    let empty_train = KernelPerceptron::new(
        PerceptronConfig::new(2),
        Arc::clone(&kernel_matrix),
        &LabelledDataset::empty(),
        &test,
        KernelIndex::new(vec![], vec![4, 5]),
    );
    assert!(matches!(empty_train, Err(PerceptronError::InvalidConfiguration(_))));

    assert!(serde_json::from_str::<KernelType>(r#"{"type":"polynomial","degree":0}"#).is_err());
    assert!(serde_json::from_str::<KernelType>(r#"{"type":"gaussian","gamma":-1.0}"#).is_err());

    let mut model = KernelPerceptron::new(
        PerceptronConfig::new(2),
        kernel_matrix,
        &train,
        &test,
        KernelIndex::contiguous(4, 2),
    )
    .unwrap();
    assert!(matches!(model.train(0, 1e-5), Err(PerceptronError::InvalidConfiguration(_))));
}

#[test]
fn test_high_level_api_workflow() {
    init_logging();
    let (train, test) = three_clusters();
    let kernel = KernelType::from_name("Gaussian", 0.5).unwrap();

    let fitted = Perceptron::new(3, kernel)
        .with_method(ClassificationMethod::OneVsOne)
        .with_max_epochs(50)
        .with_tolerance(1e-5)
        .fit(&train, &test)
        .expect("Training should succeed");

    assert_eq!(fitted.train_error(), 0.0);
    assert_eq!(fitted.predict_train().unwrap(), train.labels());

    let report = fitted.evaluate();
    assert_eq!(report.test_error, 0.0);
    assert_eq!(report.accuracy, 1.0);
    assert_eq!(report.confusion_matrix, vec![vec![0.0; 3]; 3]);

    let unseen = fitted
        .predict_points(&[vec![0.0, 4.8], vec![4.9, 0.1], vec![-4.8, -5.2]])
        .unwrap();
    assert_eq!(unseen, vec![0, 1, 2]);
}
