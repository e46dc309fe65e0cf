// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod pagespeed_client;
pub mod reqwest_probe;
pub mod resilient_client;
pub mod traits;
