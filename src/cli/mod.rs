pub mod attributes;
pub mod playbook;
