mod animation;
pub use animation::*;

mod color;
pub use color::*;

mod particle;
pub use particle::*;

mod projectile;
pub use projectile::*;

mod random;
pub use random::*;

mod settings;
pub use settings::*;

mod show;
pub use show::*;

mod spawn;
pub use spawn::*;

mod surface;
pub use surface::*;

mod viewport;
pub use viewport::*;
