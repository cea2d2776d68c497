//! Fixed SQL text. Values always travel as positional parameters.

pub const CREATE_BEASTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS beasts (\
beast_name TEXT PRIMARY KEY, \
type TEXT NOT NULL, \
cr TEXT NOT NULL, \
attributes JSONB NOT NULL DEFAULT '{}'::jsonb, \
description TEXT NOT NULL)";

pub const SELECT_ALL: &str = "SELECT beast_name, type, cr, attributes, description FROM beasts";

pub const SELECT_BY_NAME: &str =
    "SELECT beast_name, type, cr, attributes, description FROM beasts WHERE beast_name=$1";

pub const INSERT: &str =
    "INSERT INTO beasts (beast_name, type, cr, attributes, description) VALUES ($1, $2, $3, $4, $5)";

pub const UPDATE_BY_NAME: &str =
    "UPDATE beasts SET type=$1, cr=$2, attributes=$3, description=$4 WHERE beast_name=$5";

pub const DELETE_BY_NAME: &str = "DELETE FROM beasts WHERE beast_name=$1";
