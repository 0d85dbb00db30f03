use std::str::FromStr;

use alloy_primitives::Address;
use clap::Parser;

use rangecraft::chain::{PoolReader, RpcPoolReader};
use rangecraft::config::{NetworkConfig, DEFAULT_FEE, DEFAULT_TICK_SPACING};
use rangecraft::domain::PoolKey;
use rangecraft::engine::compute_range;
use rangecraft::error::AppError;

/// Offline fixture tick used by `--test` (a realistic mainnet pool tick).
const TEST_CURRENT_TICK: i32 = 196423;

#[derive(Parser, Debug)]
#[command(name = "rangecraft")]
#[command(about = "Concentrated-liquidity range calculator")]
struct Args {
    /// Full pool key as c0,c1,fee,tickSpacing,hooks
    #[arg(long)]
    pool_key: Option<String>,

    /// First token address (alternative to --pool-key)
    #[arg(long)]
    token0: Option<String>,

    /// Second token address (alternative to --pool-key)
    #[arg(long)]
    token1: Option<String>,

    /// Desired symmetric range in percent
    #[arg(long)]
    range: f64,

    /// Tick spacing override
    #[arg(long)]
    tick_spacing: Option<i32>,

    /// Current tick override (skips the chain read)
    #[arg(long)]
    current_tick: Option<i32>,

    /// JSON-RPC endpoint (overrides RPC_URL)
    #[arg(long)]
    rpc: Option<String>,

    /// Use fixed offline fixture values instead of fetching state
    #[arg(long)]
    test: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        tracing_subscriber::filter::LevelFilter::DEBUG
    } else {
        tracing_subscriber::filter::LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args).await {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let pool_key = resolve_pool_key(&args)?;
    let tick_spacing = args.tick_spacing.unwrap_or_else(|| pool_key.tick_spacing());

    let current_tick = match (args.current_tick, args.test) {
        (Some(tick), _) => tick,
        (None, true) => TEST_CURRENT_TICK,
        (None, false) => fetch_current_tick(&args, &pool_key).await?,
    };

    let report = compute_range(current_tick, tick_spacing, args.range)?;

    for warning in &report.warnings {
        eprintln!("WARNING: {}", warning);
    }

    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| AppError::Validation(format!("report serialization failed: {}", e)))?;
    println!("{}", json);

    Ok(())
}

async fn fetch_current_tick(args: &Args, pool_key: &PoolKey) -> Result<i32, AppError> {
    let mut config = NetworkConfig::from_env()?;
    if let Some(rpc) = &args.rpc {
        config.rpc_url = rpc.clone();
    }

    let reader = RpcPoolReader::new(config);
    let state = reader.get_slot0(pool_key.id()).await?;
    Ok(state.tick)
}

fn resolve_pool_key(args: &Args) -> Result<PoolKey, AppError> {
    if let Some(raw) = &args.pool_key {
        return parse_pool_key(raw);
    }

    match (&args.token0, &args.token1) {
        (Some(t0), Some(t1)) => PoolKey::from_tokens(
            parse_addr(t0, "token0")?,
            parse_addr(t1, "token1")?,
            DEFAULT_FEE,
            args.tick_spacing.unwrap_or(DEFAULT_TICK_SPACING),
            Address::ZERO,
        ),
        _ => Err(AppError::Validation(
            "either --pool-key or both --token0 and --token1 are required".to_string(),
        )),
    }
}

fn parse_pool_key(raw: &str) -> Result<PoolKey, AppError> {
    let parts: Vec<&str> = raw.split(',').map(|s| s.trim()).collect();
    if parts.len() != 5 {
        return Err(AppError::Validation(
            "--pool-key expects c0,c1,fee,tickSpacing,hooks".to_string(),
        ));
    }

    let fee = parts[2]
        .parse::<u32>()
        .map_err(|_| AppError::Validation(format!("invalid fee '{}'", parts[2])))?;
    let tick_spacing = parts[3]
        .parse::<i32>()
        .map_err(|_| AppError::Validation(format!("invalid tickSpacing '{}'", parts[3])))?;

    PoolKey::from_tokens(
        parse_addr(parts[0], "currency0")?,
        parse_addr(parts[1], "currency1")?,
        fee,
        tick_spacing,
        parse_addr(parts[4], "hooks")?,
    )
}

fn parse_addr(raw: &str, what: &str) -> Result<Address, AppError> {
    Address::from_str(raw)
        .map_err(|_| AppError::Validation(format!("invalid {} address '{}'", what, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN0: &str = "0x1111111111111111111111111111111111111111";
    const TOKEN1: &str = "0x2222222222222222222222222222222222222222";

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["rangecraft", "--range", "15"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_token_pair_uses_module_defaults() {
        let key = resolve_pool_key(&args(&["--token0", TOKEN0, "--token1", TOKEN1])).unwrap();
        assert_eq!(key.fee.to::<u32>(), DEFAULT_FEE);
        assert_eq!(key.tick_spacing(), DEFAULT_TICK_SPACING);
        assert_eq!(key.hooks, Address::ZERO);
    }

    #[test]
    fn test_tick_spacing_flag_overrides_default() {
        let key = resolve_pool_key(&args(&[
            "--token0",
            TOKEN0,
            "--token1",
            TOKEN1,
            "--tick-spacing",
            "200",
        ]))
        .unwrap();
        assert_eq!(key.tick_spacing(), 200);
    }

    #[test]
    fn test_missing_token_pair_rejected() {
        let err = resolve_pool_key(&args(&["--token0", TOKEN0])).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_full_pool_key_flag_parses() {
        let raw = format!("{}, {}, 500, 10, 0x0000000000000000000000000000000000000000", TOKEN0, TOKEN1);
        let key = resolve_pool_key(&args(&["--pool-key", &raw])).unwrap();
        assert_eq!(key.fee.to::<u32>(), 500);
        assert_eq!(key.tick_spacing(), 10);
    }

    #[test]
    fn test_pool_key_wrong_arity_rejected() {
        let raw = format!("{},{},500,10", TOKEN0, TOKEN1);
        let err = parse_pool_key(&raw).unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("c0,c1,fee,tickSpacing,hooks")),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_pool_key_invalid_fee_and_spacing_rejected() {
        let bad_fee = format!("{},{},abc,10,{}", TOKEN0, TOKEN1, TOKEN0);
        assert!(matches!(parse_pool_key(&bad_fee), Err(AppError::Validation(_))));

        let bad_spacing = format!("{},{},500,ten,{}", TOKEN0, TOKEN1, TOKEN0);
        assert!(matches!(parse_pool_key(&bad_spacing), Err(AppError::Validation(_))));

        // Well-formed numbers outside the protocol's domain also fail.
        let oversize_fee = format!("{},{},16777216,10,{}", TOKEN0, TOKEN1, TOKEN0);
        assert!(matches!(parse_pool_key(&oversize_fee), Err(AppError::Validation(_))));
        let negative_spacing = format!("{},{},500,-10,{}", TOKEN0, TOKEN1, TOKEN0);
        assert!(matches!(parse_pool_key(&negative_spacing), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_bad_address_names_the_offending_field() {
        let err = parse_addr("not_hex", "token0").unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("token0"));
                assert!(msg.contains("not_hex"));
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }
}
