use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use stoppa::{Card, Deck, Estimator, Hand, Table, UsedCardSet, groups};

/// Scores a Stoppa hand and the chance it survives an opponent's draw.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cards in hand, e.g. "7d,6d,1s"
    #[arg(long, default_value = "")]
    hand: String,

    /// Cards already seen at the table besides the hand
    #[arg(long, default_value = "")]
    used: String,

    /// Opponent draw size; defaults to the schedule's size for --turn
    #[arg(long, allow_hyphen_values = true)]
    draw: Option<i64>,

    #[arg(long, default_value_t = 4)]
    players: usize,

    #[arg(long, default_value_t = 1)]
    turn: usize,

    /// Stop after examining this many candidate draws
    #[arg(long)]
    limit: Option<u64>,

    /// Also report every later turn's draw size
    #[arg(long)]
    forecast: bool,

    /// Deal a random hand for --turn instead of reading --hand
    #[arg(long)]
    deal: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let table = Table::new(args.players)?;
    let deck = Deck::new();

    let hand = if args.deal {
        let size = table.cards_dealt_through(args.turn)?;
        info!("dealing {size} cards for turn {}", args.turn);
        Hand::new(deck.shuffled().into_iter().take(size).collect())
    } else {
        Hand::new(Card::parse_list(&args.hand).context("reading --hand")?)
    };
    let seen = Card::parse_list(&args.used).context("reading --used")?;

    let mut used = UsedCardSet::new();
    used.extend_unique(hand.cards.iter().copied())
        .context("hand repeats a card")?;
    used.extend_unique(seen).context("--used repeats a card")?;

    let remaining = deck.remaining(&used);
    let draw_size = match args.draw {
        Some(draw) => draw,
        None => table.draw_size(args.turn)? as i64,
    };
    info!(
        "{} players, turn {} of {}, {} cards left",
        table.players(),
        args.turn,
        table.max_turns(),
        remaining.len()
    );

    let mut estimator = Estimator::new();
    if let Some(limit) = args.limit {
        estimator = estimator.with_limit(limit);
    }

    println!("Hand: {hand}");
    for group in groups(hand.as_slice()) {
        println!("  {group}");
    }
    if hand.is_empty() {
        println!("  (empty)");
    }
    println!("Cards left in deck: {}", remaining.len());
    println!();

    let estimate = estimator.estimate(hand.as_slice(), &remaining, draw_size)?;
    println!("{estimate}");

    if args.forecast {
        println!();
        println!("Forecast:");
        if table.is_final(args.turn) {
            println!("  (final turn)");
            return Ok(());
        }
        let later = table.draws_from(args.turn + 1)?;
        let estimates = estimator.forecast(hand.as_slice(), &remaining, &later);
        for (offset, estimate) in estimates.iter().enumerate() {
            println!(
                "  Turn {} (draw {}): {}%{}",
                args.turn + 1 + offset,
                estimate.draw_size,
                estimate.percentage(),
                if estimate.truncated { " (partial)" } else { "" }
            );
        }
    }

    Ok(())
}
