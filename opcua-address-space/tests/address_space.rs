// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! End-to-end scenarios against a fully wired `AddressSpace` +
//! `AddressSpaceAccess`, mirroring `check_addressSpace_access.c`'s fixture
//! of a root Objects folder plus a handful of variables and objects.

use opcua_address_space::{AddNodeItem, AddressSpace, AddressSpaceAccess, EngineLimits};
use opcua_nodes::{NodeAttributes, ObjectBuilder, TimestampsToReturn, VariableAttributes, VariableBuilder};
use opcua_types::{
    AttributesMask, DataTypeId, NodeId, NumericRange, ObjectId, ObjectTypeId, QualifiedName,
    ReferenceTypeId, StatusCode, Variant, VariableTypeId,
};

fn test_fixture() -> AddressSpace {
    let mut space = AddressSpace::new();
    let folder_type: NodeId = ObjectTypeId::FolderType.into();
    let root: NodeId = ObjectId::ObjectsFolder.into();
    space
        .append(ObjectBuilder::new(&root, "Objects", "Objects").has_type_definition(folder_type).build().into())
        .unwrap();
    space
}

#[test]
fn add_node_then_read_back_value() {
    let mut space = test_fixture();
    let limits = EngineLimits::default();
    let mut access = AddressSpaceAccess::new(&mut space, limits, true);

    let new_id = NodeId::numeric(1, 1000);
    let item = AddNodeItem {
        requested_node_id: Some(new_id.clone()),
        parent_node_id: ObjectId::ObjectsFolder.into(),
        reference_type_id: ReferenceTypeId::HasComponent.into(),
        browse_name: (1u16, "Temperature").into(),
        type_definition: Some(VariableTypeId::BaseDataVariableType.into()),
        attributes: NodeAttributes::Variable(VariableAttributes {
            specified_attributes: AttributesMask::VALUE | AttributesMask::DATA_TYPE,
            display_name: Some("Temperature".into()),
            description: None,
            write_mask: 0,
            user_write_mask: 0,
            value: Some(Variant::Double(21.5)),
            data_type: Some(DataTypeId::Double.into()),
            value_rank: None,
            array_dimensions: None,
            access_level: None,
            user_access_level: None,
            minimum_sampling_interval: None,
            historizing: None,
        }),
    };

    let created = access.add_node(item).unwrap();
    assert_eq!(created, new_id);

    let value = access.read_value(&created, &NumericRange::None, TimestampsToReturn::Both).unwrap();
    assert_eq!(value.value, Variant::Double(21.5));

    let ops = access.take_operations();
    assert_eq!(ops.len(), 1);
}

#[test]
fn write_value_then_browse_and_delete() {
    let mut space = test_fixture();
    let limits = EngineLimits::default();
    let var_id = NodeId::numeric(1, 42);
    space
        .append(
            VariableBuilder::new(&var_id, "Counter", "Counter")
                .data_type(DataTypeId::Int32)
                .value(0i32)
                .writable()
                .build()
                .into(),
        )
        .unwrap();
    {
        let root = space.get_mut(&ObjectId::ObjectsFolder.into()).unwrap();
        root.references_mut().push(opcua_nodes::Reference::forward(ReferenceTypeId::HasComponent, var_id.clone()));
    }

    let mut access = AddressSpaceAccess::new(&mut space, limits, false);
    access.write_value(&var_id, &NumericRange::None, Variant::Int32(7), None, None, None).unwrap();
    let value = access.read_value(&var_id, &NumericRange::None, TimestampsToReturn::Both).unwrap();
    assert_eq!(value.value, Variant::Int32(7));

    let refs = access
        .browse(&ObjectId::ObjectsFolder.into(), opcua_address_space::BrowseDirection::Forward, None, false)
        .unwrap();
    assert!(refs.iter().any(|r| r.node_id.node_id == var_id));

    let status = access.delete_node(&var_id, true, false);
    assert_eq!(status, StatusCode::Good);
    assert_eq!(access.read_value(&var_id, &NumericRange::None, TimestampsToReturn::Both), Err(StatusCode::BadNodeIdUnknown));
}

#[test]
fn history_read_surface_validation_end_to_end() {
    let mut space = test_fixture();
    let var_id = NodeId::numeric(1, 55);
    space
        .append(VariableBuilder::new(&var_id, "Pressure", "Pressure").data_type(DataTypeId::Double).value(1.0f64).build().into())
        .unwrap();
    let limits = EngineLimits::default();
    let access = AddressSpaceAccess::new(&mut space, limits, false);

    assert_eq!(AddressSpaceAccess::validate_history_read_details(true), StatusCode::Good);
    assert_eq!(AddressSpaceAccess::validate_history_read_details(false), StatusCode::BadHistoryOperationUnsupported);

    let no_encoding: QualifiedName = (0u16, "").into();
    assert_eq!(access.validate_history_read_node(&var_id, &no_encoding, &NumericRange::None), StatusCode::Good);
}
