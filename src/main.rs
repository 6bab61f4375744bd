#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use seabattle::{init_logging, AiPlayer, CliPlayer, NetConfig, NetworkManager, Player, PlayerNode, DEFAULT_PORT};

#[cfg(feature = "std")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum PlayerType {
    Human,
    Ai,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Host a game and wait for the other player to connect.
    Host {
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        #[arg(long, value_enum, default_value_t = PlayerType::Human)]
        player: PlayerType,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Join a game hosted by the other player.
    Join {
        #[arg(long, help = "Host name or IP address of the hosting player")]
        address: String,
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        #[arg(long, value_enum, default_value_t = PlayerType::Human)]
        player: PlayerType,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let (config, player, seed) = match cli.command {
        Commands::Host { port, player, seed } => {
            println!("Hosting a game on port {}...", port);
            (NetConfig::host(port), player, seed)
        }
        Commands::Join {
            address,
            port,
            player,
            seed,
        } => {
            println!("Joining the game at {}:{}...", address, port);
            (NetConfig::client(address, port), player, seed)
        }
    };

    if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }
    let rng = if let Some(s) = seed {
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    };

    let player: Box<dyn Player> = match player {
        PlayerType::Human => Box::new(CliPlayer::new()),
        PlayerType::Ai => {
            println!("AI player selected.");
            Box::new(AiPlayer::new())
        }
    };

    let (net, events) = NetworkManager::new(config);
    let mut node = PlayerNode::new(player, net, events, rng);
    let tally = node.run().await?;
    println!(
        "Session over: {} round(s) played, {} won, {} lost.",
        tally.rounds(),
        tally.won,
        tally.lost
    );
    Ok(())
}
