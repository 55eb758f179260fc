mod helpers;

mod identity_client_test;
mod profile_test;
mod reconcile_test;
