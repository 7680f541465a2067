mod nearest;
mod node;
mod obstacle;
mod path;
mod rrt;
mod sampler;

pub use self::nearest::find_nearest;
pub use self::node::Node;
pub use self::obstacle::ObstacleList;
pub use self::path::{extract_path, path_cost};
pub use self::rrt::{PlanOutcome, Rrt, plan, plan_with_sampler};
pub use self::sampler::{Sampler, UniformSampler};
