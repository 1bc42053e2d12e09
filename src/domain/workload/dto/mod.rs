pub mod deploy_create;
