use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wxpay::{HttpTransport, MerchantConfig, TradeType, UnifiedOrderPayload, WxPayClient};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = MerchantConfig::from_env().unwrap_or_else(|e| {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    });
    tracing::debug!(?config, "loaded merchant config");

    let trade_type: TradeType = std::env::var("WXPAY_TRADE_TYPE")
        .unwrap_or_else(|_| "NATIVE".to_string())
        .parse()
        .expect("invalid WXPAY_TRADE_TYPE -- expected JSAPI, APP or NATIVE");

    let total_fee: u32 = std::env::var("WXPAY_TOTAL_FEE")
        .expect("WXPAY_TOTAL_FEE environment variable is required (amount in fen)")
        .parse()
        .expect("invalid WXPAY_TOTAL_FEE");

    let time_expire = std::env::var("WXPAY_EXPIRE_MINUTES")
        .ok()
        .and_then(|m| m.parse::<i64>().ok())
        .and_then(chrono::TimeDelta::try_minutes)
        .map(|delta| wxpay::util::format_order_time(Utc::now() + delta))
        .unwrap_or_default();

    let env_or_empty = |name: &str| std::env::var(name).unwrap_or_default();

    let payload = UnifiedOrderPayload {
        body: std::env::var("WXPAY_BODY").expect("WXPAY_BODY environment variable is required"),
        out_trade_no: std::env::var("WXPAY_OUT_TRADE_NO")
            .expect("WXPAY_OUT_TRADE_NO environment variable is required"),
        total_fee,
        spbill_create_ip: std::env::var("WXPAY_CLIENT_IP")
            .unwrap_or_else(|_| "127.0.0.1".to_string()),
        trade_type: Some(trade_type),
        openid: env_or_empty("WXPAY_OPENID"),
        product_id: env_or_empty("WXPAY_PRODUCT_ID"),
        attach: env_or_empty("WXPAY_ATTACH"),
        time_expire,
        ..Default::default()
    };

    let transport = HttpTransport::with_timeout(config.gateway_url.clone(), config.timeout)
        .expect("failed to build HTTP transport");
    let api_key = config.api_key.clone();
    let client = WxPayClient::new(config, transport);

    println!("Creating {trade_type} order {}...", payload.out_trade_no);

    let response = match client.create_order(payload).await {
        Ok(response) => response,
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    };

    println!("  prepay_id: {}", response.prepay_id);

    match response.handoff(trade_type, &api_key) {
        Some(handoff) => {
            let json = serde_json::to_string_pretty(&handoff).expect("handoff serializes");
            println!("{json}");
        }
        None => {
            eprintln!(
                "gateway answered with trade type '{}', no {trade_type} handoff available",
                response.trade_type
            );
            std::process::exit(1);
        }
    }
}
