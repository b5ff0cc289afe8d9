#[cfg(not(any(feature = "cli")))]
fn main() {}

#[cfg(feature = "cli")]
fn main() -> idbridge::prelude::IbResult<()> {
    idbridge::cli::init(&idbridge::prelude::CFG)
}
