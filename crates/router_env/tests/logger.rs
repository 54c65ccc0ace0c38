#![allow(clippy::unwrap_used)]

use router_env::{config::Log, instrument, logger, tracing, TelemetryGuard};

fn logger() -> &'static TelemetryGuard {
    use once_cell::sync::OnceCell;

    static INSTANCE: OnceCell<TelemetryGuard> = OnceCell::new();
    INSTANCE.get_or_init(|| {
        let config = router_env::Config::new().unwrap_or_default();

        router_env::setup(&config.log, "router_env_test", ["router_env", "logger"]).unwrap()
    })
}

#[instrument(skip_all, fields(installment_id))]
async fn verify_installment(installment_id: u64) -> u64 {
    tracing::Span::current().record("installment_id", installment_id);
    logger::info!(tag = ?router_env::Tag::InitiatedToGateway, "installment handed to gateway");
    installment_id
}

#[tokio::test]
async fn basic() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    logger();

    assert_eq!(verify_installment(13).await, 13);

    Ok(())
}

#[test]
fn second_setup_is_rejected() {
    logger();

    assert!(router_env::setup(&Log::default(), "router_env_test", ["router_env"]).is_err());
}
