use anyhow::Result;
use log::{info, warn};
use winit::{
    event::{DeviceEvent, Event, WindowEvent},
    event_loop::EventLoop,
    window::{CursorGrabMode, Window, WindowBuilder},
};

mod core;
mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::InputManager;
use game::settings::SettingsStore;

const SETTINGS_PATH: &str = "settings.json";
/// Simulation steps between status lines
const STATUS_INTERVAL: u64 = 120;

fn grab_cursor(window: &Window, grab: bool) {
    let result = if grab {
        window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
    } else {
        window.set_cursor_grab(CursorGrabMode::None)
    };
    if let Err(e) = result {
        warn!("Cursor grab not available: {}", e);
    }
    window.set_cursor_visible(!grab);
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Skyhop...");

    let settings_store = SettingsStore::new(SETTINGS_PATH);
    let settings = settings_store.load_or_default()?;
    let mut sim = game::level::demo_course(&settings);

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Skyhop")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;
    grab_cursor(&window, true);

    info!("Window created successfully");

    let mut game_loop = GameLoop::new();
    let mut input = InputManager::new();
    let mut last_status = 0;

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                if let Err(e) = settings_store.save(&settings) {
                    warn!("{}", e);
                }
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
                if input.take_pause_request() {
                    game_loop.toggle_pause();
                    grab_cursor(&window, !game_loop.is_paused());
                }
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => input.reset(),
            Event::DeviceEvent {
                event: DeviceEvent::MouseMotion { delta },
                ..
            } => {
                if !game_loop.is_paused() {
                    input.process_pointer_motion(delta);
                }
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                for clock in game_loop.begin_frame() {
                    let controls = input.snapshot();
                    sim.tick(&clock, &controls);
                }

                if game_loop.update_count() >= last_status + STATUS_INTERVAL {
                    last_status = game_loop.update_count();
                    let character = sim.character();
                    info!(
                        "t={:.1}s pos={:.2?} vel={:.2?} {:?} jumps={} stamina={:.0}%",
                        game_loop.sim_time(),
                        character.position(),
                        character.get_velocity(),
                        character.locomotion(),
                        character.jump_count(),
                        character.stamina_percent() * 100.0,
                    );
                }
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
