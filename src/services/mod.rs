pub mod assign_credential;
pub mod create_citizen;
pub mod create_credential;
pub mod delete_citizen;
pub mod delete_credential;
pub mod get_citizens;
pub mod get_credentials;
pub mod update_citizen;
pub mod update_credential;
pub mod verify_credentials;

// Field caps shared by the create and update validation paths. The run and telefono
// caps limit the rendered digit count, the others limit characters.
pub const MAX_RUN_DIGITS:       usize = 8;
pub const MAX_DV_CHARS:         usize = 1;
pub const MAX_NAME_CHARS:       usize = 50;
pub const MAX_TELEFONO_DIGITS:  usize = 9;
pub const MAX_CONTRASENIA_CHARS: usize = 16;
pub const MAX_CORREO_CHARS:     usize = 80;
