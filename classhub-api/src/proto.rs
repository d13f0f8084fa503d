//! Generated gRPC bindings for the `classhub.v1` proto package

tonic::include_proto!("classhub.v1");
