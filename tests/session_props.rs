use seabattle::{GamePhase, GameSession, Role, ShotResult, GRID_SIZE};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

#[derive(Debug, Clone)]
enum Step {
    EnemyShot(usize, usize),
    MyResult(usize, usize, bool),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..GRID_SIZE, 0..GRID_SIZE).prop_map(|(x, y)| Step::EnemyShot(x, y)),
        (0..GRID_SIZE, 0..GRID_SIZE, any::<bool>()).prop_map(|(x, y, h)| Step::MyResult(x, y, h)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn turn_passes_only_on_a_miss(
        seed in any::<u64>(),
        host in any::<bool>(),
        steps in prop::collection::vec(step(), 1..120),
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut session = GameSession::new();
        session.set_role(if host { Role::Host } else { Role::Client });
        session.prepare_random_fleet_for_me(&mut rng);
        session.start_round().unwrap();
        prop_assert_eq!(session.is_my_turn(), host);

        for step in steps {
            if session.phase() == GamePhase::Finished {
                break;
            }
            let before = session.is_my_turn();
            match step {
                Step::EnemyShot(x, y) => {
                    let report = session.receive_enemy_shot(x, y).unwrap();
                    if report.fleet_destroyed {
                        prop_assert_eq!(session.phase(), GamePhase::Finished);
                        prop_assert_eq!(session.is_my_turn(), before);
                    } else if report.hit {
                        prop_assert_eq!(session.is_my_turn(), before);
                    } else {
                        prop_assert!(session.is_my_turn());
                    }
                }
                Step::MyResult(x, y, hit) => {
                    let result = if hit { ShotResult::Hit } else { ShotResult::Miss };
                    let fb = session.apply_my_shot_result(x, y, result).unwrap();
                    prop_assert_eq!(fb.hit, hit);
                    if fb.enemy_lost {
                        prop_assert_eq!(session.phase(), GamePhase::Finished);
                    } else if hit {
                        prop_assert_eq!(session.is_my_turn(), before);
                    } else {
                        prop_assert!(!session.is_my_turn());
                    }
                }
            }
        }
    }
}
