// Typed records for each Linode resource kind (read-only, one pass lifetime)

mod account;
mod instance;
mod kubernetes;
mod nodebalancer;
mod object_storage;
mod ticket;
mod volume;

pub use account::Account;
pub use instance::{Instance, InstanceStats, InstanceStatsData, IoStats, NetStats};
pub use kubernetes::{LkeCluster, LkeNode, LkeNodePool, LkeNodeStatus};
pub use nodebalancer::{NodeBalancer, NodeBalancerTransfer};
pub use object_storage::{Bucket, ObjectStorageEndpoint, QuotaUsage};
pub use ticket::{Ticket, TicketStatus};
pub use volume::Volume;
