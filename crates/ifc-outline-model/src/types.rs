// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for flat building-model records
//!
//! This module defines the vocabulary shared by the resolution engine and
//! any record store backend: typed identifiers, the class enumeration,
//! field values and the record type itself.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Handle to one opened model
///
/// Negative values never identify a real model; [`ModelId::INVALID`] is the
/// sentinel returned when opening a model fails.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
pub struct ModelId(pub i32);

impl ModelId {
    /// Sentinel for a failed load
    pub const INVALID: ModelId = ModelId(-1);

    /// Whether this handle can refer to a real model
    pub fn is_valid(&self) -> bool {
        self.0 >= 0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model {}", self.0)
    }
}

/// Type-safe record identifier
///
/// Wraps the stable integer id a record carries within one loaded model.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
pub struct RecordId(pub u32);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for RecordId {
    fn from(id: u32) -> Self {
        RecordId(id)
    }
}

impl From<RecordId> for u32 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

/// Record class enumeration
///
/// Covers the classes the resolution engine consumes. Any class outside this
/// set is captured as `Unknown` with its original name and contributes
/// nothing to hierarchy or property resolution.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IfcClass {
    // Spatial structure
    IfcSite,
    IfcBuilding,
    IfcBuildingStorey,
    IfcSpace,
    IfcSpatialZone,
    IfcGrid,
    IfcObjectDefinition,
    IfcSpaceType,

    // Relationships
    IfcRelAggregates,
    IfcRelNests,
    IfcRelContainedInSpatialStructure,
    IfcRelDefinesByProperties,
    IfcRelDefinesByType,
    IfcRelDefinesByObject,

    // Property machinery
    IfcPropertySet,
    IfcElementQuantity,
    IfcPropertySingleValue,
    IfcPropertyEnumeratedValue,
    IfcPropertyListValue,
    IfcPropertyBoundedValue,
    IfcQuantityLength,
    IfcQuantityArea,
    IfcQuantityVolume,
    IfcQuantityCount,
    IfcQuantityWeight,
    IfcQuantityTime,

    /// Unknown class - stores the original class name
    Unknown(String),
}

impl IfcClass {
    /// Parse a class name string into an IfcClass
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "IFCSITE" => IfcClass::IfcSite,
            "IFCBUILDING" => IfcClass::IfcBuilding,
            "IFCBUILDINGSTOREY" => IfcClass::IfcBuildingStorey,
            "IFCSPACE" => IfcClass::IfcSpace,
            "IFCSPATIALZONE" => IfcClass::IfcSpatialZone,
            "IFCGRID" => IfcClass::IfcGrid,
            "IFCOBJECTDEFINITION" => IfcClass::IfcObjectDefinition,
            "IFCSPACETYPE" => IfcClass::IfcSpaceType,

            "IFCRELAGGREGATES" => IfcClass::IfcRelAggregates,
            "IFCRELNESTS" => IfcClass::IfcRelNests,
            "IFCRELCONTAINEDINSPATIALSTRUCTURE" => IfcClass::IfcRelContainedInSpatialStructure,
            "IFCRELDEFINESBYPROPERTIES" => IfcClass::IfcRelDefinesByProperties,
            "IFCRELDEFINESBYTYPE" => IfcClass::IfcRelDefinesByType,
            "IFCRELDEFINESBYOBJECT" => IfcClass::IfcRelDefinesByObject,

            "IFCPROPERTYSET" => IfcClass::IfcPropertySet,
            "IFCELEMENTQUANTITY" => IfcClass::IfcElementQuantity,
            "IFCPROPERTYSINGLEVALUE" => IfcClass::IfcPropertySingleValue,
            "IFCPROPERTYENUMERATEDVALUE" => IfcClass::IfcPropertyEnumeratedValue,
            "IFCPROPERTYLISTVALUE" => IfcClass::IfcPropertyListValue,
            "IFCPROPERTYBOUNDEDVALUE" => IfcClass::IfcPropertyBoundedValue,
            "IFCQUANTITYLENGTH" => IfcClass::IfcQuantityLength,
            "IFCQUANTITYAREA" => IfcClass::IfcQuantityArea,
            "IFCQUANTITYVOLUME" => IfcClass::IfcQuantityVolume,
            "IFCQUANTITYCOUNT" => IfcClass::IfcQuantityCount,
            "IFCQUANTITYWEIGHT" => IfcClass::IfcQuantityWeight,
            "IFCQUANTITYTIME" => IfcClass::IfcQuantityTime,

            _ => IfcClass::Unknown(s.to_string()),
        }
    }

    /// Get the class name as a string
    pub fn name(&self) -> &str {
        match self {
            IfcClass::IfcSite => "IFCSITE",
            IfcClass::IfcBuilding => "IFCBUILDING",
            IfcClass::IfcBuildingStorey => "IFCBUILDINGSTOREY",
            IfcClass::IfcSpace => "IFCSPACE",
            IfcClass::IfcSpatialZone => "IFCSPATIALZONE",
            IfcClass::IfcGrid => "IFCGRID",
            IfcClass::IfcObjectDefinition => "IFCOBJECTDEFINITION",
            IfcClass::IfcSpaceType => "IFCSPACETYPE",
            IfcClass::IfcRelAggregates => "IFCRELAGGREGATES",
            IfcClass::IfcRelNests => "IFCRELNESTS",
            IfcClass::IfcRelContainedInSpatialStructure => "IFCRELCONTAINEDINSPATIALSTRUCTURE",
            IfcClass::IfcRelDefinesByProperties => "IFCRELDEFINESBYPROPERTIES",
            IfcClass::IfcRelDefinesByType => "IFCRELDEFINESBYTYPE",
            IfcClass::IfcRelDefinesByObject => "IFCRELDEFINESBYOBJECT",
            IfcClass::IfcPropertySet => "IFCPROPERTYSET",
            IfcClass::IfcElementQuantity => "IFCELEMENTQUANTITY",
            IfcClass::IfcPropertySingleValue => "IFCPROPERTYSINGLEVALUE",
            IfcClass::IfcPropertyEnumeratedValue => "IFCPROPERTYENUMERATEDVALUE",
            IfcClass::IfcPropertyListValue => "IFCPROPERTYLISTVALUE",
            IfcClass::IfcPropertyBoundedValue => "IFCPROPERTYBOUNDEDVALUE",
            IfcClass::IfcQuantityLength => "IFCQUANTITYLENGTH",
            IfcClass::IfcQuantityArea => "IFCQUANTITYAREA",
            IfcClass::IfcQuantityVolume => "IFCQUANTITYVOLUME",
            IfcClass::IfcQuantityCount => "IFCQUANTITYCOUNT",
            IfcClass::IfcQuantityWeight => "IFCQUANTITYWEIGHT",
            IfcClass::IfcQuantityTime => "IFCQUANTITYTIME",
            IfcClass::Unknown(s) => s,
        }
    }

    /// Check if this class is a spatial structure element
    pub fn is_spatial(&self) -> bool {
        matches!(
            self,
            IfcClass::IfcSite
                | IfcClass::IfcBuilding
                | IfcClass::IfcBuildingStorey
                | IfcClass::IfcSpace
                | IfcClass::IfcSpatialZone
        )
    }
}

impl FromStr for IfcClass {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for IfcClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A possibly-indirect reference to another record
///
/// Consumption sites treat both arms interchangeably: `Direct` embeds the
/// referenced record, `Indirect` carries only its id. The handle resolver in
/// the engine crate is the single point that normalizes this union into a
/// full record.
#[derive(Clone, Debug, PartialEq)]
pub enum Ref {
    /// The referenced record, already embedded
    Direct(Arc<Record>),
    /// Id-only handle to the referenced record
    Indirect(RecordId),
}

impl Ref {
    /// Id of the referenced record, available on both arms
    pub fn id(&self) -> RecordId {
        match self {
            Ref::Direct(record) => record.id,
            Ref::Indirect(id) => *id,
        }
    }

    /// Get the embedded record, if this is a direct reference
    pub fn as_direct(&self) -> Option<&Arc<Record>> {
        match self {
            Ref::Direct(record) => Some(record),
            Ref::Indirect(_) => None,
        }
    }
}

/// Field value of a record
///
/// Represents any value that can appear in a record's named-field map.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum FieldValue {
    /// Absent value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value
    Number(f64),
    /// Text value
    Text(String),
    /// Enumeration value
    Enum(String),
    /// Reference to another record, embedded or indirect
    Ref(Ref),
    /// List of values
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Try to get as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as enum string
    pub fn as_enum(&self) -> Option<&str> {
        match self {
            FieldValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as reference
    pub fn as_ref_value(&self) -> Option<&Ref> {
        match self {
            FieldValue::Ref(r) => Some(r),
            _ => None,
        }
    }

    /// Try to get as list
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<RecordId> for FieldValue {
    fn from(id: RecordId) -> Self {
        FieldValue::Ref(Ref::Indirect(id))
    }
}

impl From<Record> for FieldValue {
    fn from(record: Record) -> Self {
        FieldValue::Ref(Ref::Direct(Arc::new(record)))
    }
}

impl From<Ref> for FieldValue {
    fn from(r: Ref) -> Self {
        FieldValue::Ref(r)
    }
}

impl FieldValue {
    /// Build a list of indirect references from raw ids
    pub fn id_list(ids: impl IntoIterator<Item = u32>) -> Self {
        FieldValue::List(
            ids.into_iter()
                .map(|id| FieldValue::Ref(Ref::Indirect(RecordId(id))))
                .collect(),
        )
    }
}

/// Flat building-model record
///
/// An opaque structured object with a stable id, a class and a mapping from
/// field name to field value. The record store owns all records; the engine
/// never mutates one.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// Record id, unique within one model
    pub id: RecordId,
    /// Record class
    pub class: IfcClass,
    /// Named fields
    fields: FxHashMap<String, FieldValue>,
}

impl Record {
    /// Create an empty record
    pub fn new(id: impl Into<RecordId>, class: IfcClass) -> Self {
        Self {
            id: id.into(),
            class,
            fields: FxHashMap::default(),
        }
    }

    /// Set a field, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Get a field by name
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Get text field by name
    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(|v| v.as_text())
    }

    /// Get numeric field by name
    pub fn number(&self, name: &str) -> Option<f64> {
        self.field(name).and_then(|v| v.as_number())
    }

    /// Get reference field by name
    pub fn reference(&self, name: &str) -> Option<&Ref> {
        self.field(name).and_then(|v| v.as_ref_value())
    }

    /// Get the id a reference field points to, regardless of arm
    pub fn reference_id(&self, name: &str) -> Option<RecordId> {
        self.reference(name).map(|r| r.id())
    }

    /// Get the references in a list field, in list order
    pub fn references(&self, name: &str) -> Vec<&Ref> {
        self.field(name)
            .and_then(|v| v.as_list())
            .map(|list| list.iter().filter_map(|v| v.as_ref_value()).collect())
            .unwrap_or_default()
    }

    /// Get the referenced ids of a list field, in list order
    pub fn reference_ids(&self, name: &str) -> Vec<RecordId> {
        self.references(name).into_iter().map(|r| r.id()).collect()
    }

    /// Iterate named fields
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of named fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
