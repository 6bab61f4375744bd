#![cfg(feature = "std")]

use alloc::boxed::Box;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use tokio::sync::mpsc;

use crate::{
    core::{
        ai,
        common::{ShotReport, ShotResult},
        config::PLACEMENT_ATTEMPTS,
        replay::{ReplayCoordinator, ReplayStep},
        session::{FleetSetup, GamePhase, GameSession},
    },
    player::Player,
    transport::{NetEvent, NetworkManager},
};

/// Connection lifecycle as seen by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Idle,
    WaitingForConnection,
    Connected,
}

/// Rounds finished on one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundTally {
    pub won: usize,
    pub lost: usize,
}

impl RoundTally {
    pub fn rounds(&self) -> usize {
        self.won + self.lost
    }
}

/// Drives one player through a connection: owns the session, consumes every
/// transport event in order and answers the peer.
pub struct PlayerNode {
    player: Box<dyn Player>,
    session: GameSession,
    net: NetworkManager,
    events: mpsc::UnboundedReceiver<NetEvent>,
    rng: SmallRng,
    state: AppState,
    /// Our shot still waiting for its result.
    pending_shot: Option<(usize, usize)>,
    /// Peer shot that arrived before our side of a replayed round started.
    deferred_shot: Option<(usize, usize)>,
    suppress_next_disconnect: bool,
    replay: ReplayCoordinator,
    tally: RoundTally,
}

impl PlayerNode {
    pub fn new(
        player: Box<dyn Player>,
        net: NetworkManager,
        events: mpsc::UnboundedReceiver<NetEvent>,
        rng: SmallRng,
    ) -> Self {
        Self {
            player,
            session: GameSession::new(),
            net,
            events,
            rng,
            state: AppState::Idle,
            pending_shot: None,
            deferred_shot: None,
            suppress_next_disconnect: false,
            replay: ReplayCoordinator::new(),
            tally: RoundTally::default(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn tally(&self) -> RoundTally {
        self.tally
    }

    /// Prepare the fleet, open the connection and play until it closes.
    ///
    /// Fails when the connection could not be established or a manual fleet
    /// was left incomplete.
    pub async fn run(&mut self) -> anyhow::Result<RoundTally> {
        let setup = self.player.fleet_setup();
        self.prepare_fleet(setup)?;
        self.session.set_role(self.net.role());

        self.state = AppState::WaitingForConnection;
        let net = self.net.clone();
        tokio::spawn(async move { net.start().await });

        let mut ever_connected = false;
        while let Some(event) = self.events.recv().await {
            debug!("[PlayerNode] event {:?}", event);
            if event == NetEvent::Connected {
                ever_connected = true;
            }
            if !self.handle_event(event).await? {
                break;
            }
            self.drain_deferred_shot().await?;
        }

        if !ever_connected {
            anyhow::bail!("could not establish a connection to the peer");
        }
        Ok(self.tally)
    }

    /// Returns `false` once the session is over.
    async fn handle_event(&mut self, event: NetEvent) -> anyhow::Result<bool> {
        match event {
            NetEvent::Listening(addr) => self.player.handle_listening(addr),
            NetEvent::Connected => {
                if self.state != AppState::WaitingForConnection {
                    warn!("[PlayerNode] unexpected connect in state {:?}", self.state);
                    return Ok(true);
                }
                self.state = AppState::Connected;
                self.player.handle_connected(self.session.role());
                self.start_round().await?;
            }
            NetEvent::ShotReceived { x, y } => {
                self.on_enemy_shot(x as usize, y as usize).await?;
            }
            NetEvent::ResultReceived(result) => self.on_shot_result(result).await?,
            NetEvent::ShipDestroyed { length } => {
                if self.state == AppState::Connected {
                    self.session.record_enemy_ship_destroyed(length as usize);
                    self.player.handle_enemy_ship_destroyed(length as usize);
                }
            }
            NetEvent::ResetReceived => {
                if self.state != AppState::Connected {
                    return Ok(true);
                }
                info!("[PlayerNode] peer wants another round");
                if self.replay.remote_agreed() == ReplayStep::Ready {
                    self.begin_replay().await?;
                }
            }
            NetEvent::Disconnected => {
                self.on_disconnected();
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn prepare_fleet(&mut self, setup: FleetSetup) -> anyhow::Result<()> {
        match setup {
            FleetSetup::Random => self.session.prepare_random_fleet_for_me(&mut self.rng),
            FleetSetup::Manual => {
                self.session.my_board_mut().clear();
                self.place_fleet_manually()?;
            }
        }
        Ok(())
    }

    /// Ask the player for ships until the fleet is complete. A run of
    /// rejected placements long enough to suggest a dead-end layout clears
    /// the board.
    fn place_fleet_manually(&mut self) -> anyhow::Result<()> {
        let mut rejected = 0;
        loop {
            let missing = self.session.my_board().missing_ship_lengths();
            if missing.is_empty() {
                break;
            }
            let Some(placement) =
                self.player
                    .place_ship(&mut self.rng, self.session.my_board(), &missing)
            else {
                self.session.my_board_mut().clear();
                rejected = 0;
                continue;
            };

            let placed = missing.contains(&placement.length)
                && self.session.my_board_mut().try_place_ship(
                    placement.x,
                    placement.y,
                    placement.length,
                    placement.orientation,
                );
            if placed {
                rejected = 0;
                continue;
            }
            self.player.handle_placement_rejected(placement);
            rejected += 1;
            if rejected >= PLACEMENT_ATTEMPTS {
                debug!("[PlayerNode] manual layout stuck; starting over");
                self.session.my_board_mut().clear();
                rejected = 0;
            }
        }
        self.session.notify_manual_fleet_completed()?;
        Ok(())
    }

    async fn start_round(&mut self) -> anyhow::Result<()> {
        self.session.start_round()?;
        self.pending_shot = None;
        info!(
            "[PlayerNode] round started as {:?}, {}",
            self.session.role(),
            if self.session.is_my_turn() { "our turn" } else { "peer's turn" }
        );
        self.player.handle_round_start(self.session.my_board());
        self.fire().await;
        Ok(())
    }

    /// Fire once if the turn is ours and no shot is outstanding.
    async fn fire(&mut self) {
        if self.state != AppState::Connected
            || self.session.phase() != GamePhase::InProgress
            || !self.session.is_my_turn()
            || self.pending_shot.is_some()
        {
            return;
        }

        let enemy = self.session.enemy_board();
        let chosen = self.player.select_target(&mut self.rng, enemy);
        let open = enemy
            .cell(chosen.0, chosen.1)
            .map_or(false, |cell| !cell.is_decided());
        let target = if open {
            chosen
        } else {
            warn!("[PlayerNode] player chose unusable target {:?}", chosen);
            match ai::pick_target(enemy, &mut self.rng) {
                Some(target) => target,
                None => return,
            }
        };

        self.pending_shot = Some(target);
        self.net.send_shot(target.0 as u8, target.1 as u8).await;
    }

    async fn on_enemy_shot(&mut self, x: usize, y: usize) -> anyhow::Result<()> {
        if self.state != AppState::Connected {
            return Ok(());
        }
        match self.session.phase() {
            GamePhase::FleetReady => {
                debug!("[PlayerNode] holding shot at ({}, {}) until our round starts", x, y);
                if let Some(held) = self.deferred_shot.replace((x, y)) {
                    warn!(
                        "[PlayerNode] early shot at {:?} replaced by ({}, {}) and dropped",
                        held, x, y
                    );
                }
                return Ok(());
            }
            GamePhase::InProgress if !self.session.is_my_turn() => {}
            phase => {
                warn!(
                    "[PlayerNode] ignoring shot at ({}, {}) out of turn (phase {:?})",
                    x, y, phase
                );
                return Ok(());
            }
        }

        let report = match self.session.receive_enemy_shot(x, y) {
            Ok(report) => report,
            Err(e) => {
                warn!("[PlayerNode] ignoring shot: {}", e);
                return Ok(());
            }
        };
        answer_shot(&self.net, &report).await;
        self.player
            .handle_enemy_shot((x, y), &report, self.session.my_board());

        if report.fleet_destroyed {
            self.finish_round(false).await?;
        } else {
            self.fire().await;
        }
        Ok(())
    }

    async fn on_shot_result(&mut self, result: ShotResult) -> anyhow::Result<()> {
        if self.state != AppState::Connected {
            return Ok(());
        }
        let Some((x, y)) = self.pending_shot.take() else {
            warn!("[PlayerNode] ignoring result {} with no shot outstanding", result);
            return Ok(());
        };
        let feedback = match self.session.apply_my_shot_result(x, y, result) {
            Ok(feedback) => feedback,
            Err(e) => {
                warn!("[PlayerNode] could not apply result: {}", e);
                return Ok(());
            }
        };
        self.player.handle_shot_result((x, y), result, feedback);

        if feedback.enemy_lost {
            self.finish_round(true).await?;
        } else {
            self.fire().await;
        }
        Ok(())
    }

    async fn finish_round(&mut self, won: bool) -> anyhow::Result<()> {
        if won {
            self.tally.won += 1;
        } else {
            self.tally.lost += 1;
        }
        info!(
            "[PlayerNode] round {} {} (won {}, lost {})",
            self.tally.rounds(),
            if won { "won" } else { "lost" },
            self.tally.won,
            self.tally.lost
        );
        self.player.handle_round_over(won);

        if self.player.wants_replay(won) {
            self.net.send_reset().await;
            if self.replay.decide_local(true) == ReplayStep::Ready {
                self.begin_replay().await?;
            }
        } else {
            self.replay.decide_local(false);
            self.suppress_next_disconnect = true;
            let net = self.net.clone();
            tokio::spawn(async move { net.close().await });
        }
        Ok(())
    }

    async fn begin_replay(&mut self) -> anyhow::Result<()> {
        info!("[PlayerNode] both sides agreed; starting another round");
        let setup = self.player.fleet_setup();
        self.session.start_replay(setup, &mut self.rng);
        if setup == FleetSetup::Manual {
            self.place_fleet_manually()?;
        }
        self.start_round().await
    }

    async fn drain_deferred_shot(&mut self) -> anyhow::Result<()> {
        if self.session.phase() != GamePhase::InProgress {
            return Ok(());
        }
        if let Some((x, y)) = self.deferred_shot.take() {
            self.on_enemy_shot(x, y).await?;
        }
        Ok(())
    }

    fn on_disconnected(&mut self) {
        if self.suppress_next_disconnect {
            self.suppress_next_disconnect = false;
            info!("[PlayerNode] session closed");
        } else {
            match (self.state, self.session.phase()) {
                (AppState::WaitingForConnection, _) => {
                    warn!("[PlayerNode] could not connect to the peer")
                }
                (_, GamePhase::Finished) => info!("[PlayerNode] peer left the session"),
                _ => warn!("[PlayerNode] connection to the peer was lost"),
            }
            self.session.clear_all();
        }
        self.state = AppState::Idle;
        self.pending_shot = None;
        self.deferred_shot = None;
        self.replay.reset();
    }
}

/// Tell the peer what its shot did. A sunk ship is announced before the result.
async fn answer_shot(net: &NetworkManager, report: &ShotReport) {
    if let Some(length) = report.destroyed_ship {
        net.send_ship_destroyed(length as u8).await;
    }
    net.send_result(ShotResult::for_report(report)).await;
}
