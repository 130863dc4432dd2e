/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use log::{error, warn};
use std::fmt::Display;

/// Reports a warning.
///
/// This is meant to be used from within the simulation modules,
/// so that the user can know where is the warning comming from
///
/// ```
/// use model::print_warning;
/// print_warning("Name of the module", "some warning");
/// ```
pub fn print_warning<C: Display, T: Display>(module_name: C, msg: T) {
    warn!("[in {}] {}", module_name, msg)
}

/// Reports an error.
///
/// An empty `module_name` means that the error does not come from a
/// specific simulation module
///
/// ```
/// use model::print_error;
/// print_error("Name of the module", "some error");
/// print_error("", "some other error");
/// ```
pub fn print_error<C: Display, T: Display>(module_name: C, msg: T) {
    let module_name = module_name.to_string();
    if module_name.is_empty() {
        error!("{}", msg)
    } else {
        error!("[in {}] {}", module_name, msg)
    }
}
