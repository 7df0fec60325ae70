//! Player movement and aim.

use arena_core::components::Player;
use arena_core::input::InputSnapshot;
use arena_core::math::dead_zone_aim;

/// Move the player by the left stick and re-aim from the right stick.
///
/// Stick values are used as given; NaN or out-of-range input flows
/// straight into the position.
pub fn run(player: &mut Player, input: &InputSnapshot, dt: f32, aim_dead_zone: f32) {
    player.position.x += input.left_axis.x * player.speed * dt;
    player.position.z += input.left_axis.y * player.speed * dt;
    player.position.y = player.size / 2.0;

    player.aim = dead_zone_aim(input.right_axis, player.aim, aim_dead_zone);
}
