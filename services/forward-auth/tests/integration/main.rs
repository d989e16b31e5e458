mod gate_test;
mod helpers;
mod notifier_test;
mod verify_code_test;
