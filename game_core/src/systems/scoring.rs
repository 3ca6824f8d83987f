use hecs::World;

use crate::components::{Ball, Paddle, Player, Side};
use crate::{Config, Events, GameRng};

/// Credit a point to `scorer`, then either serve again or declare a winner.
///
/// Returns the winner when the scorer reached the winning score. The ball is
/// not re-served in that case.
pub fn award_point(
    world: &mut World,
    scorer: Side,
    config: &Config,
    events: &mut Events,
    rng: &mut GameRng,
) -> Option<Side> {
    let mut reached_win = false;
    for (_entity, (paddle, player)) in world.query_mut::<(&Paddle, &mut Player)>() {
        if paddle.side == scorer {
            player.score += 1;
            reached_win = player.score >= config.win_score;
            tracing::debug!(player = %player.name, score = player.score, "point scored");
        }
    }

    match scorer {
        Side::Left => events.left_scored = true,
        Side::Right => events.right_scored = true,
    }

    if reached_win {
        events.winner = Some(scorer);
        return Some(scorer);
    }

    // Next serve heads towards the player who conceded
    let field = config.playfield();
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.serve(&field, scorer.opponent(), rng);
    }

    None
}
