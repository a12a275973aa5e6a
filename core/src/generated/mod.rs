//! gRPC/protobuf generated code.
//!
//! The output of `tonic-build` for `proto/quarry.proto` is checked in so that
//! building the workspace does not require protoc. Regenerate with
//! `QUARRY_PROTO_REGEN=1 cargo build -p quarry-core` after editing the proto.

#[allow(clippy::all)]
pub mod quarry_v1 {
    include!("quarry.v1.rs");
}
