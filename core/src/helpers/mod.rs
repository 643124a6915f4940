// Copyright (c) 2022-2023 The MobileCoin Foundation

pub mod der;
