use clap::{Parser, ValueEnum};
use configuration::{Config, load_config};
use core_types::{ExecutionMode, MarketContext, Order, OrderSide};
use engine::Engine;
use execution_log::ExecutionLog;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

/// The main entry point for the parity execution simulator.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    let mode = match cli.mode {
        Mode::Backtest => ExecutionMode::Backtest,
        Mode::Live => ExecutionMode::Live,
    };

    run_session(mode, config)
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Order-execution simulator with matching backtest and live cost modeling.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Execution mode for the demo session.
    #[arg(long, value_enum, default_value = "backtest")]
    mode: Mode,

    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Backtest,
    Live,
}

// ==============================================================================
// Demo Session
// ==============================================================================

/// Runs a small scripted session: buy BTC with a market order, sell half
/// back with a limit order, then print the portfolio and cost statistics.
fn run_session(mode: ExecutionMode, config: Config) -> anyhow::Result<()> {
    let mode_tag = match mode {
        ExecutionMode::Backtest => "backtest",
        ExecutionMode::Live => "live",
    };
    println!("=== {} session ===", mode_tag.to_uppercase());

    let mut engine = Engine::new(mode, config, ExecutionLog::new())?;

    let btc_market = MarketContext {
        volume_24h: dec!(1000),
        spread_pct: dec!(0.0005),
        volatility: dec!(0.2),
    };

    let buy = engine.execute_order(
        &Order::market("BTC/USD", OrderSide::Buy, dec!(0.1), dec!(50000)),
        &btc_market,
    )?;
    println!(
        "BUY  0.1 BTC/USD @ 50000: accepted={} fill={} slippage={} fee={}",
        buy.accepted, buy.fill_price, buy.slippage, buy.fee
    );

    let sell = engine.execute_order(
        &Order::limit("BTC/USD", OrderSide::Sell, dec!(0.05), dec!(51000)),
        &btc_market,
    )?;
    println!(
        "SELL 0.05 BTC/USD @ 51000: accepted={} fill={} slippage={} fee={}",
        sell.accepted, sell.fill_price, sell.slippage, sell.fee
    );

    let portfolio = engine.portfolio();
    println!("\nCash: {}", portfolio.cash);
    for (symbol, quantity) in &portfolio.positions {
        println!("Position: {} {}", quantity, symbol);
    }

    let stats = engine.finalize(
        format!("{mode_tag}_execution_log.json"),
        format!("{mode_tag}_portfolio_state.json"),
    )?;
    println!(
        "\nOrders: {} ({} accepted), total slippage: {}, total fees: {}",
        stats.total_orders, stats.accepted_orders, stats.total_slippage, stats.total_fees
    );

    Ok(())
}
