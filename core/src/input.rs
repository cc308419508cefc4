use bitflags::bitflags;

/// The six pad buttons the widget knows about.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Button {
    A,
    B,
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    pub const COUNT: usize = 6;

    /// Every button, in dense index order.
    pub const ALL: [Button; Button::COUNT] = [
        Button::A,
        Button::B,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    /// Dense index, also the button's bit position in [`Buttons`].
    pub const fn idx(&self) -> usize {
        match self {
            Button::A => 0,
            Button::B => 1,
            Button::Up => 2,
            Button::Down => 3,
            Button::Left => 4,
            Button::Right => 5,
        }
    }

    /// Single-bit mask for this button.
    pub const fn flag(&self) -> Buttons {
        Buttons::from_bits_truncate(1 << self.idx())
    }
}

bitflags! {
    /// Packed held-state sample for one frame, one bit per button.
    ///
    /// The input driver fills this in from whatever register or event
    /// stream the platform has; the widget only ever reads it.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
    pub struct Buttons: u8 {
        const A     = 1 << 0;
        const B     = 1 << 1;
        const UP    = 1 << 2;
        const DOWN  = 1 << 3;
        const LEFT  = 1 << 4;
        const RIGHT = 1 << 5;

        /// All four directional bits.
        const DIRECTIONS = Self::UP.bits() | Self::DOWN.bits() | Self::LEFT.bits() | Self::RIGHT.bits();
    }
}
