// scene_core/src/scripting/lua_constants.rs

/// GLOBALS
pub const ENGINE: &str = "engine";
pub const ELEMENT: &str = "Element";
pub const IO_INTERFACE: &str = "ioInterface";

// .engine APIS
pub const LOG: &str = "log";
pub const QUIT: &str = "quit";
pub const LAST: &str = "last";

// Element table
pub const NEW: &str = "new";
pub const ROOT: &str = "root";

/// Field set on a hooks table that points back at its element.
pub const HOOKS_ELEMENT: &str = "element";

// Element fields
pub const NAME: &str = "name";
pub const ID: &str = "id";

// Element methods
pub const FIND: &str = "find";
pub const GET_PARENT: &str = "getParent";
pub const ADD_CHILD: &str = "addChild";
pub const REMOVE_CHILD: &str = "removeChild";
pub const GET_CHILDREN: &str = "getChildren";
pub const IS_INSIDE_TREE: &str = "isInsideTree";
pub const FREE: &str = "free";

// IoInterface fields
pub const FILE_URL: &str = "fileUrl";

// IoInterface methods
pub const GET_FILE_PATH: &str = "getFilePath";
pub const LOAD_TEXT: &str = "loadText";
pub const SAVE_TEXT: &str = "saveText";
pub const LOAD_BINARY: &str = "loadBinary";
pub const SAVE_BINARY: &str = "saveBinary";
pub const GET_FILE_LIST_ALL: &str = "getFileListAll";
pub const GET_FILE_LIST: &str = "getFileList";
pub const FILE_EXISTS: &str = "fileExists";
pub const DELETE_FILE: &str = "deleteFile";
pub const MOVE_FILE: &str = "moveFile";
pub const CREATE_DIRECTORY: &str = "createDirectory";
pub const DELETE_DIRECTORY: &str = "deleteDirectory";
pub const DIRECTORY_EXISTS: &str = "directoryExists";

// Input event fields
pub const KIND: &str = "kind";
pub const KEY: &str = "key";
pub const ACTION: &str = "action";
pub const BUTTON: &str = "button";
pub const PRESSED: &str = "pressed";
pub const ECHO: &str = "echo";
pub const X: &str = "x";
pub const Y: &str = "y";
pub const HANDLED: &str = "handled";

// Input event methods
pub const SET_HANDLED: &str = "setHandled";
