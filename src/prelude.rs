pub use crate::{driver::*, error::*, tree::*};
