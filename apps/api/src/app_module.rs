use trellis_core::{Module, ModuleRegistrar};

use crate::users::{UsersController, UsersService};

pub struct AppModule;

impl Module for AppModule {
    fn declare(module: &mut ModuleRegistrar<'_>) {
        module
            .controller::<UsersController>()
            .provider::<UsersService>();
    }
}
