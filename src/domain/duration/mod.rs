//! Duration codec
//!
//! Three textual time representations travel through the system and they
//! are not interchangeable, so each has its own type:
//!
//! - [`ElapsedSeconds`]: an integer count of seconds, encoded for the API
//!   as `"<m>m <s>s"`.
//! - [`LooseDuration`]: an `h`/`m`/`s` token string such as `"1h2m3s"`.
//! - [`RelativePast`]: a phrase such as `"5 minutes ago"`.
//!
//! [`ClockTime`] is the shared `HH:MM:SS` display form.
//!
//! None of these operations fail. Malformed input degrades to a default
//! or is passed through untouched.

mod clock;
mod elapsed;
mod loose;
mod relative;

pub use clock::ClockTime;
pub use elapsed::ElapsedSeconds;
pub use loose::LooseDuration;
pub use relative::RelativePast;
