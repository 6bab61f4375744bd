//! Plays automatic games between two AI players over localhost TCP.
//!
//! Usage: `sim <seed1> <seed2> [replays]`

use rand::{rngs::SmallRng, SeedableRng};
use seabattle::{AiPlayer, NetConfig, NetEvent, NetworkManager, PlayerNode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    seabattle::init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 && args.len() != 4 {
        eprintln!("Usage: {} <seed1> <seed2> [replays]", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;
    let replays: usize = match args.get(3) {
        Some(n) => n.parse()?,
        None => 0,
    };

    // The host binds an ephemeral port; its Listening event tells the client
    // where to connect, so that event is peeked before the host node runs.
    let (host_net, mut host_events) = NetworkManager::new(NetConfig::host(0));
    let (relay_tx, relay_rx) = tokio::sync::mpsc::unbounded_channel();
    let (port_tx, port_rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        let mut port_tx = Some(port_tx);
        while let Some(event) = host_events.recv().await {
            if let NetEvent::Listening(addr) = event {
                if let Some(tx) = port_tx.take() {
                    let _ = tx.send(addr.port());
                }
            }
            if relay_tx.send(event).is_err() {
                break;
            }
        }
    });

    let mut host = PlayerNode::new(
        Box::new(AiPlayer::with_replays(replays)),
        host_net,
        relay_rx,
        SmallRng::seed_from_u64(seed1),
    );
    let host_task = tokio::spawn(async move { host.run().await });

    let port = port_rx.await?;
    let (client_net, client_events) = NetworkManager::new(NetConfig::client("127.0.0.1", port));
    let mut client = PlayerNode::new(
        Box::new(AiPlayer::with_replays(replays)),
        client_net,
        client_events,
        SmallRng::seed_from_u64(seed2),
    );
    let client_tally = client.run().await?;
    let host_tally = host_task.await??;

    println!(
        "host:   won {} lost {}\nclient: won {} lost {}",
        host_tally.won, host_tally.lost, client_tally.won, client_tally.lost
    );
    let winner = match host_tally.won.cmp(&client_tally.won) {
        std::cmp::Ordering::Greater => "host",
        std::cmp::Ordering::Less => "client",
        std::cmp::Ordering::Equal => "tie",
    };
    println!("winner: {}", winner);
    Ok(())
}
