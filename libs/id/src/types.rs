//! Typed ID definitions for catalog resources.

use crate::define_object_id;

define_object_id!(FilmId);
