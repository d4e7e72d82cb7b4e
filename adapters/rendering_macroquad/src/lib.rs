#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Maze Chase.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_down, is_key_pressed, KeyCode};
use maze_chase_core::{CellCoord, CellKind, HeldDirections};
use maze_chase_rendering::{
    Color, FrameInput, LoopControl, Palette, Presentation, RenderingBackend, Scene,
};
use std::{collections::VecDeque, time::Duration};

/// Height of the status strip drawn beneath the maze, in pixels.
const HUD_HEIGHT: f32 = 40.0;
/// Font size of the status line.
const HUD_FONT_SIZE: f32 = 28.0;
/// Pickup radius relative to the tile side.
const PICKUP_RADIUS_RATIO: f32 = 5.0 / 32.0;
/// Actor radius relative to the tile side.
const ACTOR_RADIUS_RATIO: f32 = 0.4;

/// Snapshot of the keyboard observed during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// Arrow keys or `WASD` held on this frame.
    held: HeldDirections,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self::from_observations(is_key_pressed, is_key_down)
    }

    fn from_observations<P, D>(pressed: P, down: D) -> Self
    where
        P: Fn(KeyCode) -> bool,
        D: Fn(KeyCode) -> bool,
    {
        let quit_requested = pressed(KeyCode::Escape) || pressed(KeyCode::Q);
        let held = HeldDirections {
            up: down(KeyCode::Up) || down(KeyCode::W),
            down: down(KeyCode::Down) || down(KeyCode::S),
            left: down(KeyCode::Left) || down(KeyCode::A),
            right: down(KeyCode::Right) || down(KeyCode::D),
        };

        Self {
            quit_requested,
            held,
        }
    }

    fn frame_input(self) -> FrameInput {
        FrameInput {
            held: self.held,
            quit_requested: self.quit_requested,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> LoopControl + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            palette,
            scene,
        } = presentation;

        let tile_grid = scene.tile_grid;
        let mut config = macroquad::window::Conf {
            window_title,
            window_width: tile_grid.width().ceil() as i32,
            window_height: (tile_grid.height() + HUD_HEIGHT).ceil() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(palette.background);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let control = update_scene(frame_dt, keyboard.frame_input(), &mut scene);
                if keyboard.quit_requested || control == LoopControl::Exit {
                    break;
                }

                macroquad::window::clear_background(background);
                let metrics = SceneMetrics::from_scene(
                    &scene,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                draw_cells(&scene, &metrics, &palette);
                draw_actors(&scene, &metrics, &palette);
                draw_status_line(&scene, &metrics, &palette);

                if let Some(FpsMetrics {
                    per_second,
                    trailing_ten_seconds,
                }) = fps_counter.record_frame(frame_dt)
                {
                    if show_fps {
                        println!("FPS: {per_second:.2} (10s avg: {trailing_ten_seconds:.2})");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Screen-space placement of the maze after scaling it to fit the window.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    tile_step: f32,
    hud_baseline: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let tile_grid = scene.tile_grid;
        let world_width = tile_grid.width();
        let world_height = tile_grid.height();
        let available_height = (screen_height - HUD_HEIGHT).max(0.0);
        let scale = if world_width <= f32::EPSILON || world_height <= f32::EPSILON {
            1.0
        } else {
            (screen_width / world_width).min(available_height / world_height)
        };

        let scaled_width = world_width * scale;
        let scaled_height = world_height * scale;
        let offset_x = ((screen_width - scaled_width) * 0.5).max(0.0);
        let offset_y = ((available_height - scaled_height) * 0.5).max(0.0);

        Self {
            scale,
            offset_x,
            offset_y,
            tile_step: tile_grid.tile_length * scale,
            hud_baseline: offset_y + scaled_height + HUD_HEIGHT * 0.7,
        }
    }

    fn project(&self, world: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + world.x * self.scale,
            self.offset_y + world.y * self.scale,
        )
    }

    fn cell_origin(&self, scene: &Scene, cell: CellCoord) -> Vec2 {
        self.project(scene.tile_grid.cell_origin(cell))
    }

    fn cell_center(&self, scene: &Scene, cell: CellCoord) -> Vec2 {
        self.project(scene.tile_grid.cell_center(cell))
    }
}

fn draw_cells(scene: &Scene, metrics: &SceneMetrics, palette: &Palette) {
    if metrics.tile_step <= f32::EPSILON {
        return;
    }

    let wall = to_macroquad_color(palette.wall);
    let pickup = to_macroquad_color(palette.pickup);
    let pickup_radius = metrics.tile_step * PICKUP_RADIUS_RATIO;

    for (cell, kind) in scene.iter_cells() {
        match kind {
            CellKind::Wall => {
                let origin = metrics.cell_origin(scene, cell);
                macroquad::shapes::draw_rectangle(
                    origin.x,
                    origin.y,
                    metrics.tile_step,
                    metrics.tile_step,
                    wall,
                );
            }
            CellKind::Pickup => {
                let center = metrics.cell_center(scene, cell);
                macroquad::shapes::draw_circle(center.x, center.y, pickup_radius, pickup);
            }
            CellKind::Empty => {}
        }
    }
}

fn draw_actors(scene: &Scene, metrics: &SceneMetrics, palette: &Palette) {
    let radius = metrics.tile_step * ACTOR_RADIUS_RATIO;

    let player = metrics.cell_center(scene, scene.player);
    macroquad::shapes::draw_circle(
        player.x,
        player.y,
        radius,
        to_macroquad_color(palette.player),
    );

    let adversary_color = to_macroquad_color(palette.adversary);
    for adversary in &scene.adversaries {
        let origin = metrics.cell_origin(scene, adversary.cell);
        let inset = (metrics.tile_step - radius * 2.0) * 0.5;
        macroquad::shapes::draw_rectangle(
            origin.x + inset,
            origin.y + inset,
            radius * 2.0,
            radius * 2.0,
            adversary_color,
        );
    }
}

fn draw_status_line(scene: &Scene, metrics: &SceneMetrics, palette: &Palette) {
    let _ = macroquad::text::draw_text(
        &scene.status_line(),
        metrics.offset_x + 8.0,
        metrics.hud_baseline,
        HUD_FONT_SIZE,
        to_macroquad_color(palette.text),
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
