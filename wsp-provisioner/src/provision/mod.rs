pub mod directive;
pub mod env;
pub mod matcher;
pub mod provisioner;
pub mod volume;

pub use directive::SecretDirective;
pub use provisioner::SecretProvisioner;
