use tokio_test::assert_ok;

use online_sgd::{
    Family, GlmGenerator, HyperParameters, KernelBuilder, KernelHandle, Loss, Schedule,
};

async fn stream(kernel: &KernelHandle, generator: GlmGenerator<rand::rngs::StdRng>, n: usize) {
    for obs in generator.take(n) {
        assert_ok!(kernel.observe(obs.x, obs.y).await);
    }
}

#[actix_rt::test]
async fn linear_estimate_converges_to_the_true_parameters() {
    let betas = vec![1., 2., 3.];
    let generator =
        GlmGenerator::seeded(Family::Linear { noise: 0.3 }, betas.clone(), Some(7)).unwrap();

    let kernel = KernelBuilder::new(vec![2., 1., 1.])
        .gradient(Loss::Linear)
        .schedule(Schedule::Constant { eta: 0.01 })
        .spawn()
        .unwrap();

    stream(&kernel, generator, 2000).await;

    let snapshot = assert_ok!(kernel.snapshot().await);
    assert_eq!(snapshot.step, 2000);
    assert!(!snapshot.diverged);
    for (j, (theta, beta)) in snapshot.params.iter().zip(&betas).enumerate() {
        assert!(
            (theta - beta).abs() < 0.1,
            "theta[{j}] = {theta}, expected {beta}"
        );
    }
}

#[actix_rt::test]
async fn logistic_estimate_converges_to_the_true_parameter() {
    let generator = GlmGenerator::seeded(Family::Logistic, vec![2.], Some(11)).unwrap();

    let kernel = KernelBuilder::new(vec![10.])
        .gradient(Loss::Logistic)
        .schedule(Schedule::PowerLaw)
        .hyperparameters(HyperParameters::new(10., 0.6, 0., 0.))
        .spawn()
        .unwrap();

    stream(&kernel, generator, 200_000).await;

    let snapshot = assert_ok!(kernel.snapshot().await);
    assert!(!snapshot.diverged);
    let theta = snapshot.params[0];
    assert!((theta - 2.).abs() < 0.1, "theta = {theta}");
}
