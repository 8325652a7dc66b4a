pub mod robust;
