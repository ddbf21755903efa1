// Demo course
//
// A single flat island with one of each actuator, a shuttle platform off the
// east edge and a kill plane underneath that returns the player to the start.

use glam::Vec3;

use crate::engine::physics::PhysicsWorld;
use crate::game::actuators::{ExitBehavior, LaunchPad, PushZone, RespawnZone, Volume, Vortex};
use crate::game::camera::{CameraConfig, CameraRig};
use crate::game::character::{CharacterController, ControllerConfig};
use crate::game::platform::MovingPlatform;
use crate::game::settings::Settings;
use crate::game::simulation::Simulation;

/// Where the character starts and respawns (capsule centre)
pub const SPAWN_POINT: Vec3 = Vec3::new(0.0, 1.05, 0.0);

const ISLAND_HALF_EXTENTS: Vec3 = Vec3::new(30.0, 0.5, 30.0);
const KILL_PLANE_Y: f32 = -20.0;

pub fn demo_course(settings: &Settings) -> Simulation {
    let mut physics = PhysicsWorld::new();
    physics.add_ground(Vec3::new(0.0, -0.5, 0.0), ISLAND_HALF_EXTENTS);

    let shuttle = MovingPlatform::new(
        &mut physics,
        Vec3::new(34.0, -0.5, 0.0),
        Vec3::new(3.0, 0.5, 3.0),
        3.0,
    )
    .with_waypoint(Vec3::new(50.0, -0.5, 0.0))
    .with_waypoint(Vec3::new(50.0, 4.5, 12.0));

    let props = [
        physics.add_prop(Vec3::new(3.0, 3.0, 18.0), 0.5),
        physics.add_prop(Vec3::new(-2.0, 5.0, 22.0), 0.5),
        physics.add_prop(Vec3::new(6.0, 1.0, -6.0), 0.75),
    ];

    let character = CharacterController::new(ControllerConfig::default(), SPAWN_POINT);
    let camera_config = CameraConfig {
        sensitivity: settings.camera_sensitivity,
        ..CameraConfig::default()
    };
    let camera = CameraRig::new(camera_config, SPAWN_POINT);

    let mut sim = Simulation::new(physics, character, Some(camera));
    sim.add_platform(shuttle);
    for prop in props {
        sim.add_prop(prop);
    }

    sim.add_actuator(
        LaunchPad::new(
            "launch pad",
            Volume::cuboid(Vec3::new(8.0, 0.75, 0.0), Vec3::new(1.5, 0.75, 1.5)),
        )
        .with_force(18.0, Vec3::new(6.0, 0.0, 0.0)),
    );

    let mut updraft = PushZone::new(
        "updraft",
        Volume::cuboid(Vec3::new(-10.0, 4.0, 0.0), Vec3::new(2.0, 4.0, 2.0)),
        Vec3::new(0.0, 10.0, 0.0),
    );
    updraft.accelerate_over_time = true;
    updraft.exit_behavior = ExitBehavior::ClearPushDirection;
    sim.add_actuator(updraft);

    sim.add_actuator(Vortex::new("whirlpool", Vec3::new(0.0, 6.0, 20.0), 8.0));

    let mut kill_plane = RespawnZone::new(
        "kill plane",
        Volume::cuboid(
            Vec3::new(0.0, KILL_PLANE_Y, 0.0),
            Vec3::new(500.0, 5.0, 500.0),
        ),
        Some(SPAWN_POINT),
    );
    kill_plane.respawn_delay = 0.5;
    kill_plane.fade_duration = Some(0.25);
    kill_plane.reset_rotation = Some(Vec3::ZERO);
    sim.add_actuator(kill_plane);

    log::info!(
        "Demo course ready: {} actuators, {} props",
        sim.actuators().len(),
        sim.props().len()
    );
    sim
}
