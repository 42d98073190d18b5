mod camera_control;

pub use camera_control::apply_input_to_scene;

use orbit_core::MoveIntent;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

//
// ──────────────────────────────────────────────────────────────
//   Per-frame input snapshot
//
//   Held state (buttons, movement keys) persists across frames.
//   Deltas, wheel notches and one-shot actions are cleared by
//   end_frame().
// ──────────────────────────────────────────────────────────────
//

pub struct InputState
{
  pub mouse_x: f32,
  pub mouse_y: f32,
  pub mouse_dx: f32,
  pub mouse_dy: f32,
  has_cursor: bool,

  pub left_held: bool,

  pub scroll_notches: i32,

  pub movement: MoveIntent,

  pub toggle_lock: bool,
  pub exit_requested: bool,
}

impl InputState
{
  pub fn new() -> Self
  {
    Self {
      mouse_x: 0.0,
      mouse_y: 0.0,
      mouse_dx: 0.0,
      mouse_dy: 0.0,
      has_cursor: false,

      left_held: false,

      scroll_notches: 0,

      movement: MoveIntent::default(),

      toggle_lock: false,
      exit_requested: false,
    }
  }

  pub fn handle_event(&mut self, event: &WindowEvent)
  {
    match event
    {
      WindowEvent::CursorMoved { position, .. } =>
      {
        self.cursor_moved(position.x as f32, position.y as f32);
      }

      WindowEvent::CursorLeft { .. } =>
      {
        self.has_cursor = false;
      }

      WindowEvent::MouseInput { state, button, .. } =>
      {
        self.mouse_button(*button, *state == ElementState::Pressed);
      }

      WindowEvent::MouseWheel { delta, .. } => match delta
      {
        MouseScrollDelta::LineDelta(_, y) => self.wheel(*y),
        MouseScrollDelta::PixelDelta(p) => self.wheel(p.y as f32),
      },

      WindowEvent::KeyboardInput { event, .. } =>
      {
        if let PhysicalKey::Code(code) = event.physical_key
        {
          self.key(code, event.state == ElementState::Pressed, event.repeat);
        }
      }

      WindowEvent::Focused(false) =>
      {
        self.release_all();
      }

      _ =>
      {}
    }
  }

  pub fn end_frame(&mut self)
  {
    self.mouse_dx = 0.0;
    self.mouse_dy = 0.0;
    self.scroll_notches = 0;
    self.toggle_lock = false;
  }

  //
  // ──────────────────────────────────────────────────────────────
  //   Event handlers
  // ──────────────────────────────────────────────────────────────
  //

  fn cursor_moved(&mut self, x: f32, y: f32)
  {
    // First sample after entering the window only establishes a position.
    if self.has_cursor
    {
      self.mouse_dx += x - self.mouse_x;
      self.mouse_dy += y - self.mouse_y;
    }

    self.mouse_x = x;
    self.mouse_y = y;
    self.has_cursor = true;
  }

  fn mouse_button(&mut self, button: MouseButton, pressed: bool)
  {
    if button == MouseButton::Left
    {
      // Drags start from the press position.
      if pressed && !self.left_held
      {
        self.mouse_dx = 0.0;
        self.mouse_dy = 0.0;
      }
      self.left_held = pressed;
    }
  }

  // One notch per wheel event, whatever the platform's magnitude.
  fn wheel(&mut self, y: f32)
  {
    if y > 0.0
    {
      self.scroll_notches += 1;
    }
    else if y < 0.0
    {
      self.scroll_notches -= 1;
    }
  }

  fn key(&mut self, code: KeyCode, pressed: bool, repeat: bool)
  {
    match code
    {
      KeyCode::KeyW => self.movement.forward = pressed,
      KeyCode::KeyS => self.movement.back = pressed,
      KeyCode::KeyA => self.movement.turn_left = pressed,
      KeyCode::KeyD => self.movement.turn_right = pressed,

      KeyCode::KeyF if pressed && !repeat => self.toggle_lock = true,
      KeyCode::Escape if pressed => self.exit_requested = true,

      _ =>
      {}
    }
  }

  fn release_all(&mut self)
  {
    self.left_held = false;
    self.movement = MoveIntent::default();
    self.has_cursor = false;
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn first_cursor_sample_has_no_delta()
  {
    let mut input = InputState::new();

    input.cursor_moved(300.0, 200.0);
    assert_eq!((input.mouse_dx, input.mouse_dy), (0.0, 0.0));

    input.cursor_moved(310.0, 195.0);
    input.cursor_moved(312.0, 190.0);
    assert_eq!((input.mouse_dx, input.mouse_dy), (12.0, -10.0));

    input.end_frame();
    assert_eq!((input.mouse_dx, input.mouse_dy), (0.0, 0.0));
    assert_eq!((input.mouse_x, input.mouse_y), (312.0, 190.0));
  }

  #[test]
  fn motion_before_press_is_not_a_drag()
  {
    let mut input = InputState::new();

    input.cursor_moved(100.0, 100.0);
    input.cursor_moved(140.0, 80.0);
    input.mouse_button(MouseButton::Left, true);
    assert_eq!((input.mouse_dx, input.mouse_dy), (0.0, 0.0));

    input.cursor_moved(145.0, 83.0);
    assert_eq!((input.mouse_dx, input.mouse_dy), (5.0, 3.0));

    // a repeated press report mid-drag keeps the drag
    input.mouse_button(MouseButton::Left, true);
    assert_eq!((input.mouse_dx, input.mouse_dy), (5.0, 3.0));
  }

  #[test]
  fn wheel_counts_notches_by_sign()
  {
    let mut input = InputState::new();

    input.wheel(1.0);
    input.wheel(120.0);
    input.wheel(-0.5);
    input.wheel(0.0);
    assert_eq!(input.scroll_notches, 1);

    input.end_frame();
    assert_eq!(input.scroll_notches, 0);
  }

  #[test]
  fn movement_keys_track_held_state()
  {
    let mut input = InputState::new();

    input.key(KeyCode::KeyW, true, false);
    input.key(KeyCode::KeyA, true, false);
    input.end_frame();
    assert!(input.movement.forward);
    assert!(input.movement.turn_left);

    input.key(KeyCode::KeyW, false, false);
    assert!(!input.movement.forward);
  }

  #[test]
  fn lock_toggle_fires_once_per_press()
  {
    let mut input = InputState::new();

    input.key(KeyCode::KeyF, true, false);
    assert!(input.toggle_lock);
    input.end_frame();

    input.key(KeyCode::KeyF, true, true);
    assert!(!input.toggle_lock);

    input.key(KeyCode::KeyF, false, false);
    assert!(!input.toggle_lock);
  }

  #[test]
  fn escape_requests_exit()
  {
    let mut input = InputState::new();
    input.key(KeyCode::Escape, true, false);
    assert!(input.exit_requested);
  }

  #[test]
  fn focus_loss_releases_everything()
  {
    let mut input = InputState::new();
    input.mouse_button(MouseButton::Left, true);
    input.key(KeyCode::KeyS, true, false);

    input.handle_event(&WindowEvent::Focused(false));

    assert!(!input.left_held);
    assert_eq!(input.movement, MoveIntent::default());
  }
}
