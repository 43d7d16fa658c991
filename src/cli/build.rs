use crate::driver::{BuildOptions, Driver};

pub(super) fn action(driver: &mut Driver, options: BuildOptions) {
    if let Err(errs) = driver.build(options) {
        driver.emit_errors(errs);
    }
}
