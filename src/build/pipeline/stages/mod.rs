//! Default pipeline stages.
//!
//! The standard build pipeline consists of:
//!
//! 1. **ConvertStage** - Run the converter once per markdown document
//! 2. **AssetsStage** - Copy configured asset globs into the output directory
//! 3. **GenerateStage** - Remove the stale site and run the site generator
//! 4. **ArchiveStage** - Zip the generated site

mod archive;
mod assets;
mod convert;
mod generate;

pub use archive::ArchiveStage;
pub use assets::AssetsStage;
pub use convert::ConvertStage;
pub use generate::GenerateStage;
