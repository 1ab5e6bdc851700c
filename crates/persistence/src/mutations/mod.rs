// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side mutations. Every public function here is atomic.

mod batch;
mod sequences;

pub use batch::commit_batch;
pub use sequences::next_id;
