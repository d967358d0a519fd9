// Copyright (c) 2026 rezky_nightky

//! Built-in face bitmaps. ' ' is off, 'x' is on; all rows of a face must
//! have the same length. Draw new faces on the board with the mouse and
//! copy the exported pattern printed on exit into this table.

pub const BUILTIN_FACES: &[(&str, &[&str])] = &[
    (
        "grin",
        &[
            "   xx     xx   ",
            "  x  x   x  x  ",
            "               ",
            " x           x ",
            " x           x ",
            "  x         x  ",
            "   xxxxxxxxx   ",
        ],
    ),
    (
        "heart",
        &[
            "  xx   xx  ",
            " xxxx xxxx ",
            "xxxxxxxxxxx",
            "xxxxxxxxxxx",
            " xxxxxxxxx ",
            "  xxxxxxx  ",
            "   xxxxx   ",
            "    xxx    ",
            "     x     ",
        ],
    ),
    (
        "neutral",
        &[
            "  xx      xx  ",
            "  xx      xx  ",
            "              ",
            "              ",
            "   xxxxxxxx   ",
        ],
    ),
    (
        "smile",
        &[
            "  xx      xx  ",
            "  xx      xx  ",
            "              ",
            "              ",
            " x          x ",
            "  x        x  ",
            "   xxxxxxxx   ",
        ],
    ),
    (
        "surprised",
        &[
            "  xx      xx  ",
            "  xx      xx  ",
            "              ",
            "     xxxx     ",
            "    x    x    ",
            "    x    x    ",
            "     xxxx     ",
        ],
    ),
    (
        "wink",
        &[
            "          xx  ",
            "  xxxx    xx  ",
            "              ",
            "              ",
            " x          x ",
            "  x        x  ",
            "   xxxxxxxx   ",
        ],
    ),
];
