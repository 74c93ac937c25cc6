// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_protocol;
pub(crate) mod utils;
