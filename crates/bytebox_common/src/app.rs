use crate::key::Key;

/// A machine that a frontend can drive one frame at a time.
pub trait App {
    fn init(&mut self);
    /// Advances one frame and writes it to `screen` as RGB24.
    fn update(&mut self, screen: &mut [u8]);
    fn handle_key_event(&mut self, key: Key, is_down: bool);
    /// The frontend window gained or lost focus.
    fn handle_focus(&mut self, _focused: bool) {}
    fn should_exit(&self) -> bool;
    fn exit(&mut self);

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn scale(&self) -> u32;
    fn title(&self) -> String;
}
