use std::env;

use anyhow::{Context, Result, bail};
use log::{info, warn};
use rand::rngs::StdRng;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use online_sgd::{
    Family, GeneratorConfig, GlmGenerator, HyperParameters, KernelBuilder, KernelConfig,
    KernelHandle, Loss, Penalty, Schedule,
};

/// Linear regression demo used when no config path is given.
fn demo_config() -> KernelConfig {
    KernelConfig {
        initial: vec![2., 1., 1.],
        loss: Loss::Linear,
        schedule: Schedule::Constant { eta: 0.01 },
        penalty: Penalty::None,
        adaptive: false,
        min_denominator: online_sgd::config::DEFAULT_MIN_DENOMINATOR,
        hyperparameters: HyperParameters::default(),
        generator: Some(GeneratorConfig {
            family: Family::Linear { noise: 0.3 },
            betas: vec![1., 2., 3.],
            seed: Some(42),
            observations: 2000,
            report_every: 500,
        }),
    }
}

/// Streams `observations` samples into the kernel, stopping early once `token` is cancelled.
///
/// # Returns
/// The amount of observations actually sent.
async fn feed(
    kernel: KernelHandle,
    generator: GlmGenerator<StdRng>,
    observations: usize,
    report_every: usize,
    token: CancellationToken,
) -> Result<usize> {
    for (i, obs) in generator.take(observations).enumerate() {
        if token.is_cancelled() {
            warn!("feed cancelled after {i} observations");
            return Ok(i);
        }

        kernel.observe(obs.x, obs.y).await?;

        if report_every > 0 && (i + 1) % report_every == 0 {
            let snapshot = kernel.snapshot().await?;
            info!(
                step = snapshot.step,
                diverged = snapshot.diverged;
                "theta = {:?}", snapshot.params
            );
        }
    }

    Ok(observations)
}

#[actix_rt::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => KernelConfig::from_path(&path)
            .with_context(|| format!("cannot load config '{path}'"))?,
        None => demo_config(),
    };

    let Some(gen_config) = config.generator.clone() else {
        bail!("config has no generator section");
    };

    let generator = GlmGenerator::seeded(gen_config.family, gen_config.betas, gen_config.seed)?;
    if generator.dim() != config.initial.len() {
        bail!(
            "generator yields {} features but the kernel has {} parameters",
            generator.dim(),
            config.initial.len()
        );
    }

    let kernel = KernelBuilder::from_config(&config)?.spawn()?;

    let token = CancellationToken::new();
    let ctrl_c_token = token.clone();
    actix_rt::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("received SIGINT, cancelling feed");
            ctrl_c_token.cancel();
        }
    });

    let feeder = actix_rt::spawn(feed(
        kernel.clone(),
        generator,
        gen_config.observations,
        gen_config.report_every,
        token,
    ));
    let sent = feeder.await.context("feed task failed")??;

    let snapshot = kernel.snapshot().await?;
    kernel.shutdown().await?;

    println!("observations: {sent}");
    println!("step: {}", snapshot.step);
    println!("theta: {:?}", snapshot.params);
    println!("diverged: {}", snapshot.diverged);

    Ok(())
}
